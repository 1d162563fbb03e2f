//! CLI argument definitions for the stockroom binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

/// Stockroom storefront data tool
#[derive(Parser, Debug)]
#[command(name = "stockroom")]
#[command(about = "Stockroom: durable entity stores for a storefront")]
#[command(version)]
pub struct Cli {
    /// Data directory for the store snapshot files
    #[arg(
        short = 'D',
        long,
        default_value = "./stockroom-data",
        env = "STOCKROOM_DATA_DIR",
        global = true
    )]
    pub data_dir: PathBuf,

    /// Use a throwaway in-memory backend instead of the data directory
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Human, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new user account
    Signup(SignupArgs),
    /// Log in, optionally remembering the session across invocations
    Login(LoginArgs),
    /// End the active session and forget any remembered login
    Logout,
    /// Show the current session
    Whoami,
    /// Update the logged-in user's profile
    Profile(ProfileArgs),
    /// Change the logged-in user's password
    Passwd(PasswdArgs),
    /// Request a password reset email
    ForgotPassword(ForgotPasswordArgs),
    /// User administration
    #[command(subcommand)]
    User(UserCommands),
    /// Product catalog
    #[command(subcommand)]
    Catalog(CatalogCommands),
    /// Product reviews
    #[command(subcommand)]
    Review(ReviewCommands),
    /// Contact and complaint messages
    #[command(subcommand)]
    Complaint(ComplaintCommands),
}

/// Arguments for the signup command
#[derive(clap::Args, Debug)]
pub struct SignupArgs {
    /// Display name for the new account
    pub name: String,
    /// Email address; must not be registered yet
    pub email: String,
    /// Password for the new account
    pub password: String,
}

/// Arguments for the login command
#[derive(clap::Args, Debug)]
pub struct LoginArgs {
    /// Email address (matched case-insensitively)
    pub email: String,
    /// Account password
    pub password: String,

    /// Remember the session so later invocations stay logged in
    #[arg(short, long)]
    pub remember: bool,
}

/// Arguments for the profile command
#[derive(clap::Args, Debug)]
pub struct ProfileArgs {
    /// New display name
    #[arg(long)]
    pub name: Option<String>,

    /// New phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// New postal address
    #[arg(long)]
    pub address: Option<String>,

    /// New bio line
    #[arg(long)]
    pub bio: Option<String>,

    /// New avatar URL
    #[arg(long)]
    pub avatar: Option<String>,
}

/// Arguments for the passwd command
#[derive(clap::Args, Debug)]
pub struct PasswdArgs {
    /// The new password
    pub new_password: String,
}

/// Arguments for the forgot-password command
#[derive(clap::Args, Debug)]
pub struct ForgotPasswordArgs {
    /// Email address to send reset instructions to
    pub email: String,
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List all users
    List,
    /// Delete a user; an active session for that user ends with it
    Delete(EntityIdArg),
    /// Reset a user's password to the well-known default
    ResetPassword(EntityIdArg),
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List all products
    List,
    /// Add a product to the catalog
    Add(CatalogAddArgs),
    /// Update fields of an existing product
    Update(CatalogUpdateArgs),
    /// Remove a product from the catalog
    Remove(EntityIdArg),
}

/// Product category choices
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Phones,
    Laptops,
    Routers,
    Wristwatches,
    Speakers,
    Accessories,
}

impl From<CategoryArg> for stockroom::Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Phones => stockroom::Category::Phones,
            CategoryArg::Laptops => stockroom::Category::Laptops,
            CategoryArg::Routers => stockroom::Category::Routers,
            CategoryArg::Wristwatches => stockroom::Category::Wristwatches,
            CategoryArg::Speakers => stockroom::Category::Speakers,
            CategoryArg::Accessories => stockroom::Category::Accessories,
        }
    }
}

/// Arguments for the catalog add command
#[derive(clap::Args, Debug)]
pub struct CatalogAddArgs {
    /// Product id; must not be taken
    #[arg(long)]
    pub id: String,

    /// Product name
    #[arg(long)]
    pub name: String,

    /// Price in the store currency
    #[arg(long)]
    pub price: f64,

    /// Product category
    #[arg(long, value_enum)]
    pub category: CategoryArg,

    /// Product description
    #[arg(long)]
    pub description: String,

    /// Product image URL
    #[arg(long)]
    pub image: String,

    /// Brand name
    #[arg(long)]
    pub brand: Option<String>,
}

/// Arguments for the catalog update command
#[derive(clap::Args, Debug)]
pub struct CatalogUpdateArgs {
    /// Id of the product to update
    pub id: String,

    /// New product name
    #[arg(long)]
    pub name: Option<String>,

    /// New price
    #[arg(long)]
    pub price: Option<f64>,

    /// New category
    #[arg(long, value_enum)]
    pub category: Option<CategoryArg>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New image URL
    #[arg(long)]
    pub image: Option<String>,

    /// New brand name
    #[arg(long)]
    pub brand: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ReviewCommands {
    /// List reviews, newest first
    List(ReviewListArgs),
    /// Add a review as the logged-in user
    Add(ReviewAddArgs),
}

/// Arguments for the review list command
#[derive(clap::Args, Debug)]
pub struct ReviewListArgs {
    /// Only show reviews for this product
    #[arg(long)]
    pub product: Option<String>,
}

/// Arguments for the review add command
#[derive(clap::Args, Debug)]
pub struct ReviewAddArgs {
    /// Id of the product being reviewed
    #[arg(long)]
    pub product: String,

    /// Star rating from 1 to 5
    #[arg(long)]
    pub rating: u8,

    /// Review text
    #[arg(long)]
    pub comment: String,
}

/// Message kind choices for filed complaints
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ComplaintKindArg {
    Contact,
    Complaint,
}

impl From<ComplaintKindArg> for stockroom::ComplaintKind {
    fn from(arg: ComplaintKindArg) -> Self {
        match arg {
            ComplaintKindArg::Contact => stockroom::ComplaintKind::Contact,
            ComplaintKindArg::Complaint => stockroom::ComplaintKind::Complaint,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ComplaintCommands {
    /// List filed messages, newest first
    List,
    /// File a contact or complaint message
    File(ComplaintFileArgs),
    /// Mark a message as read
    MarkRead(EntityIdArg),
}

/// Arguments for the complaint file command
#[derive(clap::Args, Debug)]
pub struct ComplaintFileArgs {
    /// Sender name
    #[arg(long)]
    pub name: String,

    /// Sender email address
    #[arg(long)]
    pub email: String,

    /// Whether this is a general contact message or a complaint
    #[arg(long, value_enum, default_value_t = ComplaintKindArg::Contact)]
    pub kind: ComplaintKindArg,

    /// Message body
    #[arg(long)]
    pub message: String,

    /// Related order id, for complaints about an order
    #[arg(long)]
    pub order: Option<String>,
}

/// Positional entity id shared by several commands
#[derive(clap::Args, Debug)]
pub struct EntityIdArg {
    /// Id of the entity to operate on
    pub id: String,
}
