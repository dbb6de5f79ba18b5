use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use registration::editors::{AccountEditor, AdmissionTestEditor, GalleryEditor, ProfileEditor};
use registration::flows::{ProviderSections, VerificationPatch, VerificationSections};
use registration::sections::{Availability, BinaryRef, PaymentMethod, Proficiency};
use registration::{
    Flow, FreelancerVerificationController, HttpGateway, InMemoryGateway, Page,
    ProviderRegistrationController, QuestionBank, RegistrationConfig, Role, Session,
    SubmissionError, SubmissionGateway, User, WorkflowController, WorkflowError,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "registration", about = "Walk a provider onboarding workflow end to end")]
struct Args {
    /// YAML configuration file, relative to the working directory. Relative
    /// paths inside it resolve against the file's own directory.
    #[arg(long, default_value = "registration/metadata/registration.yaml")]
    config: PathBuf,

    #[arg(long, value_enum, default_value_t = FlowKind::Provider)]
    flow: FlowKind,

    /// Keep applications in memory instead of posting them
    #[arg(long)]
    offline: bool,

    /// Fail the first offline submission and retry it
    #[arg(long)]
    simulate_failure: bool,

    #[arg(long, default_value = "Omar Haddad")]
    name: String,

    #[arg(long, default_value = "omar.haddad@example.com")]
    email: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FlowKind {
    Provider,
    Verification,
}

struct Gateways<S: Send + Sync + 'static> {
    shared: Arc<dyn SubmissionGateway<S>>,
    memory: Option<Arc<InMemoryGateway<S>>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = RegistrationConfig::load(&args.config)?;

    let username = args.email.split('@').next().unwrap_or_default().to_string();
    let mut session = Session::anonymous();
    session.sign_in(User {
        id: format!("u-{username}"),
        name: args.name.clone(),
        email: args.email.clone(),
        role: Role::Freelancer,
    });

    match args.flow {
        FlowKind::Provider => {
            let bank = config.question_bank()?;
            let gateways = build_gateways(&config, &args)?;
            run_provider(&session, &bank, &username, gateways).await
        }
        FlowKind::Verification => {
            let gateways = build_gateways(&config, &args)?;
            run_verification(&session, gateways).await
        }
    }
}

fn build_gateways<S>(config: &RegistrationConfig, args: &Args) -> Result<Gateways<S>>
where
    S: Serialize + Send + Sync + 'static,
{
    if !args.offline {
        if let Some(http) = HttpGateway::from_config(&config.gateway)? {
            if args.simulate_failure {
                warn!("--simulate-failure only applies offline, ignoring it");
            }
            return Ok(Gateways {
                shared: Arc::new(http),
                memory: None,
            });
        }
        warn!("no gateway URL configured, keeping the application in memory");
    }

    let memory = Arc::new(InMemoryGateway::new());
    if args.simulate_failure {
        memory.fail_with(SubmissionError::Transport("simulated outage".into()));
    }
    Ok(Gateways {
        shared: memory.clone(),
        memory: Some(memory),
    })
}

fn log_navigation(page: Page) {
    info!(%page, "navigating");
}

async fn run_provider(
    session: &Session,
    bank: &QuestionBank,
    username: &str,
    gateways: Gateways<ProviderSections>,
) -> Result<()> {
    let mut controller =
        ProviderRegistrationController::start(session, gateways.shared, Box::new(log_navigation))?;

    let mut account = AccountEditor::new(&controller.state().sections().account);
    account
        .set_username(username)
        .accept_terms(true)
        .accept_privacy(true);
    controller.update_section(account.patch())?;
    advance(&mut controller)?;

    let mut profile = ProfileEditor::new(&controller.state().sections().profile);
    profile
        .set_job_title("Backend engineer")
        .set_specialization("Payments infrastructure")
        .set_introduction("Ten years building ledgers and settlement systems.")
        .set_availability(Availability::PartTime)
        .set_hourly_rate(45.0)?;
    for skill in ["Rust", "PostgreSQL", "Kafka"] {
        profile.add_skill(skill);
    }
    profile.add_language("English", Proficiency::Advanced);
    profile.add_language("Arabic", Proficiency::Native);
    controller.update_section(profile.patch())?;
    advance(&mut controller)?;

    let mut gallery = GalleryEditor::new(&controller.state().sections().gallery);
    gallery
        .edit_item(0, |item| {
            item.title = "Card settlement engine".into();
            item.description = "Nightly settlement for a regional card issuer".into();
            item.thumbnail = Some(BinaryRef::new("settlement.png", "image/png", 48_213));
        })?
        .set_item_skills(0, &["Rust", "Kafka"])?;
    gallery.add_certificate(BinaryRef::new("aws-sa.pdf", "application/pdf", 120_440));
    controller.update_section(gallery.patch())?;
    advance(&mut controller)?;

    // Demo applicant answers from the key.
    let mut test = AdmissionTestEditor::new(bank);
    for question in bank.questions() {
        test.answer(question.id, question.answer)?;
    }
    controller.update_section(test.finish()?)?;

    submit(&mut controller, gateways.memory.as_deref()).await
}

async fn run_verification(
    session: &Session,
    gateways: Gateways<VerificationSections>,
) -> Result<()> {
    let mut controller =
        FreelancerVerificationController::start(session, gateways.shared, Box::new(log_navigation))?;

    controller.update_section(VerificationPatch::IdentityDocument(BinaryRef::new(
        "passport.jpg",
        "image/jpeg",
        182_004,
    )))?;
    advance(&mut controller)?;

    controller.update_section(VerificationPatch::Selfie(BinaryRef::new(
        "selfie.jpg",
        "image/jpeg",
        96_512,
    )))?;
    advance(&mut controller)?;

    controller.update_section(VerificationPatch::phone_number("+971 50 000 0001"))?;
    controller.update_section(VerificationPatch::mark_phone_verified())?;
    advance(&mut controller)?;

    controller.update_section(VerificationPatch::payment_method(PaymentMethod::Paypal))?;

    submit(&mut controller, gateways.memory.as_deref()).await
}

fn advance<F: Flow>(controller: &mut WorkflowController<F>) -> Result<()> {
    if controller.advance() {
        return Ok(());
    }
    let state = controller.state();
    let errors: Vec<String> = state.step_errors().iter().map(ToString::to_string).collect();
    bail!(
        "step {} ({}) is incomplete: {}",
        state.current_step(),
        state.step_title(),
        errors.join("; ")
    )
}

async fn submit<F: Flow>(
    controller: &mut WorkflowController<F>,
    memory: Option<&InMemoryGateway<F::Sections>>,
) -> Result<()> {
    let ack = match (controller.submit().await, memory) {
        (Ok(ack), _) => ack,
        (Err(WorkflowError::Submission(err)), Some(memory)) => {
            warn!(error = %err, "submission failed, retrying once");
            memory.recover();
            controller.submit().await?
        }
        (Err(err), _) => return Err(err.into()),
    };

    println!("--- ACK ---\n{}", serde_json::to_string_pretty(&ack)?);
    println!(
        "--- APPLICATION {} ---\n{}",
        controller.state().application_id(),
        serde_json::to_string_pretty(controller.state().sections())?
    );
    Ok(())
}
