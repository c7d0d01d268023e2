//! Account command handlers: login, registration, and profile management.

use chrono::{Datelike, Local, NaiveDate};
use clap::Subcommand;
use steamshop_client::{Notice, StoreClient};
use steamshop_core::{
    initials, validate_login, validate_profile, validate_registration, Credentials, DateSelection,
    FieldError, NewUser, ProfileDraft, ProfileEdit, RegistrationForm, Session,
};

use crate::report;

/// Earliest birth year the profile form accepts.
const FIRST_BIRTH_YEAR: i32 = 1900;

/// Sub-commands available under `profile`.
#[derive(Debug, Subcommand)]
pub enum ProfileCommands {
    /// Print the signed-in user's profile
    Show,
    /// Create the profile for a freshly registered account
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// Birth date as YYYY-MM-DD
        #[arg(long)]
        birth_date: NaiveDate,
        #[arg(long, default_value = "")]
        bio: String,
    },
    /// Update name, age, and bio
    Edit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: u32,
        #[arg(long, default_value = "")]
        bio: String,
    },
}

fn reject_invalid(form: &str, errors: &[FieldError]) -> anyhow::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    for e in errors {
        eprintln!("  {e}");
    }
    anyhow::bail!("{form} form has {} invalid field(s)", errors.len())
}

pub(crate) async fn run_login(
    client: &StoreClient,
    username: String,
    password: String,
) -> anyhow::Result<()> {
    let credentials = Credentials { username, password };
    reject_invalid("login", &validate_login(&credentials))?;

    let session = report("Login", client.login(&credentials).await)?;
    let greeting = session
        .user_name()
        .map_or_else(|| "You are signed in".to_string(), |n| format!("Welcome back, {n}"));
    println!("{}", Notice::success("Signed in", greeting));
    if let Some(token) = session.token() {
        println!("export STEAMSHOP_TOKEN={}", token.expose());
    }
    Ok(())
}

pub(crate) async fn run_register(
    client: &StoreClient,
    email: &str,
    username: &str,
    password: &str,
    confirm_password: &str,
) -> anyhow::Result<()> {
    let form = RegistrationForm {
        email,
        username,
        password,
        confirm_password,
    };
    reject_invalid("registration", &validate_registration(&form))?;

    let user = NewUser {
        username: username.to_owned(),
        password: password.to_owned(),
        email: email.to_owned(),
    };
    report("Registration", client.register(&user).await)?;
    println!(
        "{}",
        Notice::success("Registered", "Your account has been created; sign in with `steamshop login`")
    );
    Ok(())
}

pub(crate) async fn run_profile(
    client: &StoreClient,
    session: &Session,
    command: ProfileCommands,
) -> anyhow::Result<()> {
    match command {
        ProfileCommands::Show => {
            let profile = report("Loading your profile", client.fetch_profile(session).await)?;
            let (first, last) = profile.name.split_once(' ').unwrap_or((profile.name.as_str(), ""));
            println!("[{}] {}", initials(first, last), profile.name);
            println!("username: {}", profile.username);
            println!("age:      {}", profile.age);
            if !profile.bio.is_empty() {
                println!("\n{}", profile.bio);
            }
            Ok(())
        }
        ProfileCommands::Create {
            first_name,
            last_name,
            birth_date,
            bio,
        } => {
            let today = Local::now().date_naive();
            let mut picker = DateSelection::new(FIRST_BIRTH_YEAR, today.year(), today);
            if !picker.select(birth_date) {
                anyhow::bail!(
                    "{}: birth year must be between {FIRST_BIRTH_YEAR} and {}",
                    picker.error().unwrap_or("invalid date"),
                    today.year()
                );
            }

            let draft = ProfileDraft {
                first_name,
                last_name,
                birth_date: picker.selected(),
                bio,
            };
            reject_invalid("profile", &validate_profile(&draft))?;

            report(
                "Profile creation",
                client.create_profile(session, &draft, today).await,
            )?;
            println!("{}", Notice::success("Profile created", "Your profile has been created"));
            Ok(())
        }
        ProfileCommands::Edit { name, age, bio } => {
            let edit = ProfileEdit { name, age, bio };
            let profile = report("Profile update", client.edit_profile(session, &edit).await)?;
            println!(
                "{}",
                Notice::success("Profile updated", format!("Saved changes for {}", profile.name))
            );
            Ok(())
        }
    }
}
