//! Identity commands: signup, login/logout, profile, and user administration.

use stockroom::{Storefront, User, UserPatch};

use crate::cli::{ForgotPasswordArgs, LoginArgs, PasswdArgs, ProfileArgs, SignupArgs};
use crate::output::{OutputFormat, print_table};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// JSON view of a user with the password field left out.
fn user_json(user: &User) -> serde_json::Value {
    serde_json::json!({
        "id": user.id.to_string(),
        "name": user.name,
        "email": user.email,
        "role": user.role.as_str(),
        "phone": user.phone,
        "address": user.address,
        "bio": user.bio,
        "avatar": user.avatar,
    })
}

/// Run the signup command
pub fn signup(store: &mut Storefront, args: &SignupArgs, format: OutputFormat) -> CommandResult {
    let created = store
        .identity_mut()
        .signup(&args.name, &args.email, &args.password)?;

    match format {
        OutputFormat::Human => {
            if created {
                println!("Account created for {}. You can log in now.", args.email);
            } else {
                eprintln!("Signup failed: that email is already registered.");
                std::process::exit(1);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "created": created }));
            if !created {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

/// Run the login command
pub fn login(store: &mut Storefront, args: &LoginArgs, format: OutputFormat) -> CommandResult {
    let authenticated = store
        .identity_mut()
        .login(&args.email, &args.password, args.remember)?;

    match format {
        OutputFormat::Human => {
            if authenticated {
                let user = store.identity().current_user().expect("session just started");
                println!("Logged in as {} ({})", user.name, user.email);
                if args.remember {
                    println!("Session remembered; later invocations stay logged in.");
                }
            } else {
                eprintln!("Login failed: invalid email or password.");
                std::process::exit(1);
            }
        }
        OutputFormat::Json => {
            let user = store.identity().current_user().map(user_json);
            println!(
                "{}",
                serde_json::json!({
                    "authenticated": authenticated,
                    "remembered": args.remember && authenticated,
                    "user": user,
                })
            );
            if !authenticated {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

/// Run the logout command
pub fn logout(store: &mut Storefront, format: OutputFormat) -> CommandResult {
    store.identity_mut().logout()?;

    match format {
        OutputFormat::Human => println!("Logged out."),
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "authenticated": false }))
        }
    }
    Ok(())
}

/// Run the whoami command
pub fn whoami(store: &Storefront, format: OutputFormat) -> CommandResult {
    let identity = store.identity();

    match format {
        OutputFormat::Human => match identity.current_user() {
            Some(user) => {
                println!("{} ({})", user.name, user.email);
                println!("Role:       {}", user.role);
                if let Some(session) = identity.session() {
                    let remembered = if session.remembered() { "yes" } else { "no" };
                    println!("Remembered: {remembered}");
                }
            }
            None => println!("Not logged in."),
        },
        OutputFormat::Json => {
            let session = identity.session();
            println!(
                "{}",
                serde_json::json!({
                    "authenticated": session.is_some(),
                    "remembered": session.map(|s| s.remembered()),
                    "user": identity.current_user().map(user_json),
                })
            );
        }
    }
    Ok(())
}

/// Run the profile command
pub fn profile(store: &mut Storefront, args: &ProfileArgs, format: OutputFormat) -> CommandResult {
    let patch = UserPatch {
        name: args.name.clone(),
        phone: args.phone.clone(),
        address: args.address.clone(),
        bio: args.bio.clone(),
        avatar: args.avatar.clone(),
        ..Default::default()
    };
    let updated = store.identity_mut().update_profile(patch)?;

    if !updated {
        eprintln!("Not logged in. Use `login --remember` first.");
        std::process::exit(1);
    }

    match format {
        OutputFormat::Human => println!("Profile updated."),
        OutputFormat::Json => {
            let user = store.identity().current_user().map(user_json);
            println!("{}", serde_json::json!({ "updated": true, "user": user }));
        }
    }
    Ok(())
}

/// Run the passwd command
pub fn passwd(store: &mut Storefront, args: &PasswdArgs, format: OutputFormat) -> CommandResult {
    let changed = store.identity_mut().change_password(&args.new_password)?;

    if !changed {
        eprintln!("Not logged in. Use `login --remember` first.");
        std::process::exit(1);
    }

    match format {
        OutputFormat::Human => println!("Password changed."),
        OutputFormat::Json => println!("{}", serde_json::json!({ "changed": true })),
    }
    Ok(())
}

/// Run the forgot-password command
pub fn forgot_password(
    store: &Storefront,
    args: &ForgotPasswordArgs,
    format: OutputFormat,
) -> CommandResult {
    store.identity().forgot_password(&args.email)?;

    // The response never reveals whether the address is registered
    match format {
        OutputFormat::Human => {
            println!("If that address is registered, reset instructions are on their way.")
        }
        OutputFormat::Json => println!("{}", serde_json::json!({ "requested": true })),
    }
    Ok(())
}

/// Run the `user list` command
pub fn list(store: &Storefront, format: OutputFormat) -> CommandResult {
    let users = store.identity().users();

    match format {
        OutputFormat::Human => {
            let rows: Vec<Vec<String>> = users
                .iter()
                .map(|u| {
                    vec![
                        u.id.to_string(),
                        u.name.clone(),
                        u.email.clone(),
                        u.role.to_string(),
                    ]
                })
                .collect();
            print_table(&["ID", "NAME", "EMAIL", "ROLE"], &rows);
        }
        OutputFormat::Json => {
            let entries: Vec<_> = users.iter().map(user_json).collect();
            println!("{}", serde_json::to_string(&entries)?);
        }
    }
    Ok(())
}

/// Run the `user delete` command
pub fn delete(store: &mut Storefront, id: &str, format: OutputFormat) -> CommandResult {
    let removed = store.identity_mut().delete_user(&id.into())?;

    if !removed {
        eprintln!("No user with id {id}.");
        std::process::exit(1);
    }

    match format {
        OutputFormat::Human => println!("User {id} deleted."),
        OutputFormat::Json => println!("{}", serde_json::json!({ "deleted": true, "id": id })),
    }
    Ok(())
}

/// Run the `user reset-password` command
pub fn reset_password(store: &mut Storefront, id: &str, format: OutputFormat) -> CommandResult {
    let reset = store.identity_mut().reset_user_password(&id.into())?;

    if !reset {
        eprintln!("No user with id {id}.");
        std::process::exit(1);
    }

    match format {
        OutputFormat::Human => println!("Password reset for user {id}."),
        OutputFormat::Json => println!("{}", serde_json::json!({ "reset": true, "id": id })),
    }
    Ok(())
}
