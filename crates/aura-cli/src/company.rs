//! `aura company …`

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use aura_client::CompanyContext;
use aura_core::{
  company::{CompanyProfilePatch, CompanySession, JobLocation, NewJob},
  state::{Snapshot, Trigger},
};
use clap::{Args, Subcommand};

use crate::{Env, print_json};

#[derive(Subcommand, Debug)]
pub enum CompanyCommand {
  /// Sign in with email and password.
  Login {
    email:    String,
    #[arg(long, env = "AURA_PASSWORD", hide_env_values = true)]
    password: String,
  },
  /// Create a company account. Sign in after verifying the email.
  Register {
    email:        String,
    company_name: String,
    #[arg(long, env = "AURA_PASSWORD", hide_env_values = true)]
    password:     String,
  },
  /// Sign out and forget the stored credential.
  Logout,
  /// Print the hydrated company record and its jobs.
  Whoami,
  /// List the company's jobs with their status.
  Jobs,
  RequestEmailOtp { email: String },
  VerifyEmail { email: String, otp: String },
  VerifyGst { gst_number: String },
  /// Update company profile fields.
  Profile {
    #[arg(long)]
    company_name:   Option<String>,
    #[arg(long)]
    contact_person: Option<String>,
    #[arg(long)]
    gst_number:     Option<String>,
  },
  /// Post a new job.
  CreateJob(JobArgs),
  /// Submit a draft job for requirement extraction and matching.
  ProcessJob { job_id: String },
}

#[derive(Args, Debug)]
pub struct JobArgs {
  #[arg(long)]
  title:    String,
  #[arg(long = "skill", required = true)]
  skills:   Vec<String>,
  #[arg(long)]
  lat:      f64,
  #[arg(long)]
  lng:      f64,
  #[arg(long)]
  label:    String,
  /// Number of interns to take.
  #[arg(long, default_value_t = 1)]
  intake:   u32,
  #[arg(long)]
  stipend:  Option<f64>,
  #[arg(long)]
  perks:    Option<String>,
  /// File holding the job description text.
  #[arg(long, value_name = "FILE")]
  jd:       PathBuf,
}

impl JobArgs {
  async fn into_new_job(self) -> Result<NewJob> {
    let original_jd = tokio::fs::read_to_string(&self.jd)
      .await
      .with_context(|| format!("reading job description {}", self.jd.display()))?;
    Ok(NewJob {
      title: self.title,
      required_skills: self.skills,
      location: JobLocation { lat: self.lat, lng: self.lng, label: self.label },
      intake: self.intake,
      stipend: self.stipend,
      perks: self.perks,
      original_jd,
    })
  }
}

fn summarise(snapshot: &Snapshot<CompanySession>) {
  match snapshot.record() {
    Some(s) => println!(
      "signed in as {} <{}> (email verified: {}, jobs: {})",
      s.company.company_name,
      s.company.email,
      s.company.email_verified,
      s.jobs.len()
    ),
    None => println!("signed out"),
  }
}

pub async fn run(env: &Env, cmd: CompanyCommand) -> Result<()> {
  let ctx = CompanyContext::new(env.client.clone(), env.store.clone());

  match cmd {
    CompanyCommand::Login { email, password } => {
      summarise(&ctx.login(&email, &password).await?);
    }
    CompanyCommand::Register { email, company_name, password } => {
      println!("{}", ctx.register(&email, &password, &company_name).await?.message);
    }
    CompanyCommand::Logout => summarise(&ctx.logout().await?),
    CompanyCommand::Whoami => {
      let snapshot = ctx.refresh(Trigger::Startup).await?;
      match snapshot.record() {
        Some(session) => print_json(session)?,
        None => bail!("not signed in"),
      }
    }
    CompanyCommand::Jobs => {
      let snapshot = ctx.refresh(Trigger::Startup).await?;
      let Some(session) = snapshot.record() else { bail!("not signed in") };
      for job in &session.jobs {
        println!("{}\t{:?}\t{}", job.id, job.status, job.title);
      }
    }
    CompanyCommand::RequestEmailOtp { email } => {
      println!("{}", ctx.request_email_otp(&email).await?.message);
    }
    CompanyCommand::VerifyEmail { email, otp } => {
      summarise(&ctx.verify_email_otp(&email, &otp).await?);
    }
    CompanyCommand::VerifyGst { gst_number } => summarise(&ctx.verify_gst(&gst_number).await?),
    CompanyCommand::Profile { company_name, contact_person, gst_number } => {
      let patch = CompanyProfilePatch { company_name, contact_person, gst_number };
      summarise(&ctx.update_profile(&patch).await?);
    }
    CompanyCommand::CreateJob(args) => {
      let job = args.into_new_job().await?;
      ctx.refresh(Trigger::Startup).await?;
      let created = ctx.create_job(&job).await?;
      print_json(&created)?;
    }
    CompanyCommand::ProcessJob { job_id } => {
      if ctx.process_job(&job_id).await? {
        println!("job {job_id} submitted for processing");
      } else {
        bail!("server declined to process job {job_id}");
      }
    }
  }
  Ok(())
}
