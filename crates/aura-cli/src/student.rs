//! `aura student …`

use anyhow::{Result, bail};
use aura_client::StudentContext;
use aura_core::{
  state::{Snapshot, Trigger},
  student::{GeoPoint, Preferences, StudentProfilePatch, StudentRecord, WorkStyle},
};
use clap::Subcommand;

use crate::{Env, print_json};

#[derive(Subcommand, Debug)]
pub enum StudentCommand {
  /// Sign in with email and password.
  Login {
    email:    String,
    #[arg(long, env = "AURA_PASSWORD", hide_env_values = true)]
    password: String,
  },
  /// Create a student account.
  Register {
    email:    String,
    phone:    String,
    #[arg(long, env = "AURA_PASSWORD", hide_env_values = true)]
    password: String,
  },
  /// Sign out and forget the stored credential.
  Logout,
  /// Print the hydrated student record.
  Whoami,
  RequestEmailOtp { email: String },
  VerifyEmail { email: String, otp: String },
  RequestPhoneOtp { phone: String },
  VerifyPhone { phone: String, otp: String },
  /// Print the URL that starts Google sign-in.
  OauthUrl { callback: String },
  /// Accept the token handed to the OAuth callback.
  OauthComplete { token: String },
  /// Update name, phone or location.
  Profile {
    #[arg(long)]
    name:  Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long, requires = "lng")]
    lat:   Option<f64>,
    #[arg(long, requires = "lat")]
    lng:   Option<f64>,
  },
  /// Confirm the extracted skill list.
  ConfirmSkills {
    #[arg(required = true)]
    skills: Vec<String>,
  },
  /// Set placement preferences.
  Preferences {
    #[arg(long = "domain", required = true)]
    domains:    Vec<String>,
    #[arg(long)]
    work_style: WorkStyle,
    /// Maximum commute distance in kilometres.
    #[arg(long)]
    distance:   f64,
    #[arg(long)]
    stipend:    Option<f64>,
  },
}

fn summarise(snapshot: &Snapshot<StudentRecord>) {
  match snapshot.record() {
    Some(r) => println!(
      "signed in as {} <{}> (status: {:?}, email verified: {}, phone verified: {})",
      r.name, r.email, r.status, r.email_verified, r.phone_verified
    ),
    None => println!("signed out"),
  }
}

pub async fn run(env: &Env, cmd: StudentCommand) -> Result<()> {
  let ctx = StudentContext::new(env.client.clone(), env.store.clone());

  match cmd {
    StudentCommand::Login { email, password } => {
      summarise(&ctx.login(&email, &password).await?);
    }
    StudentCommand::Register { email, phone, password } => {
      ctx.register(&email, &password, &phone).await?;
      println!("registered; verify your email next");
    }
    StudentCommand::Logout => summarise(&ctx.logout().await?),
    StudentCommand::Whoami => {
      let snapshot = ctx.refresh(Trigger::Startup).await?;
      match snapshot.record() {
        Some(record) => print_json(record)?,
        None => bail!("not signed in"),
      }
    }
    StudentCommand::RequestEmailOtp { email } => {
      println!("{}", ctx.request_email_otp(&email).await?.message);
    }
    StudentCommand::VerifyEmail { email, otp } => {
      summarise(&ctx.verify_email_otp(&email, &otp).await?);
    }
    StudentCommand::RequestPhoneOtp { phone } => {
      println!("{}", ctx.request_phone_otp(&phone).await?.message);
    }
    StudentCommand::VerifyPhone { phone, otp } => {
      summarise(&ctx.verify_phone_otp(&phone, &otp).await?);
    }
    StudentCommand::OauthUrl { callback } => println!("{}", ctx.google_oauth_url(&callback)?),
    StudentCommand::OauthComplete { token } => summarise(&ctx.complete_oauth(&token).await?),
    StudentCommand::Profile { name, phone, lat, lng } => {
      let location = lat.zip(lng).map(|(lat, lng)| GeoPoint { lat, lng });
      let patch = StudentProfilePatch { name, phone, location };
      summarise(&ctx.update_profile(&patch).await?);
    }
    StudentCommand::ConfirmSkills { skills } => summarise(&ctx.confirm_skills(&skills).await?),
    StudentCommand::Preferences { domains, work_style, distance, stipend } => {
      let preferences = Preferences { domains, work_style, distance, stipend };
      summarise(&ctx.update_preferences(&preferences).await?);
    }
  }
  Ok(())
}
