//! Command-line driver for the listing wizard.
//!
//! Walks the four steps with values from the command line, so the draft
//! persistence and gallery rules can be exercised without a browser.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use listing_wizard::validation::fields;
use listing_wizard::{
    logging, Draft, DraftStore, FileStore, KeyValueStore, Language, LanguagePreference,
    MediaFile, MemoryStore, Navigator, ObjectUrlRegistry, RawInput, SubmitOutcome, Translator,
    WizardConfig, WizardController,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "listing-wizard")]
#[command(about = "Author a real-estate listing draft step by step")]
struct Cli {
    /// Locale used when no language has been chosen yet (e.g. fr-FR)
    #[arg(long, default_value = "en-US")]
    locale: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every step of the wizard
    Post(PostArgs),

    /// Print the persisted basic-info draft
    Draft,

    /// Choose the interface language (de, en, fr, ar)
    Lang { code: String },
}

#[derive(clap::Args)]
struct PostArgs {
    #[arg(long)]
    property_type: String,
    #[arg(long, default_value = "sale")]
    transaction: String,
    #[arg(long)]
    price: String,
    #[arg(long)]
    area: String,
    #[arg(long)]
    address: String,

    /// Photo files, in gallery order
    #[arg(long = "photo")]
    photos: Vec<PathBuf>,
    #[arg(long)]
    video_link: Option<String>,

    #[arg(long)]
    bedrooms: Option<String>,
    #[arg(long)]
    bathrooms: Option<String>,
    /// Comma-separated amenities (parking, balcony, garden, ...)
    #[arg(long)]
    amenities: Option<String>,
    #[arg(long)]
    description: Option<String>,

    /// Confirm the review step
    #[arg(long)]
    confirm: bool,
}

/// Navigator for a terminal: there are no pages, so just log the route.
struct LogNavigator;

impl Navigator for LogNavigator {
    fn advance_to(&mut self, path: &str) {
        info!(path, "next step");
    }

    fn return_to(&mut self, path: &str) {
        info!(path, "previous step");
    }

    fn complete(&mut self, draft: &Draft) {
        info!(steps = draft.completed_steps().count(), "draft complete");
    }
}

fn main() -> Result<()> {
    logging::init_with_default("warn,listing_wizard=info");

    let cli = Cli::parse();
    let config = WizardConfig::from_env().context("Failed to load configuration")?;

    match &config.storage_dir {
        Some(dir) => run(cli, &config, FileStore::new(dir.clone())),
        None => run(cli, &config, MemoryStore::new()),
    }
}

fn run<S: KeyValueStore>(cli: Cli, config: &WizardConfig, store: S) -> Result<()> {
    let preference = LanguagePreference::new(&store, config.language_key.clone());
    let lang = preference.resolve(&cli.locale);
    let mut translator = Translator::bundled(lang, config.fallback_language)
        .context("Failed to load translations")?;

    match cli.command {
        Commands::Lang { code } => {
            let lang: Language = code.parse()?;
            preference.save(lang);
            translator.set_language(lang);
            println!(
                "{} ({}): {}",
                lang.native_name(),
                translator.direction().as_str(),
                translator.t("post_ad.title")
            );
        }
        Commands::Draft => {
            let drafts = DraftStore::load(&store, config);
            match drafts.basic_info() {
                Some(info) => {
                    println!(
                        "{}, {}: {} / {} m2, {}",
                        info.property_type.label(),
                        info.transaction_type.label(),
                        info.asking_price,
                        info.area_sqm,
                        info.address
                    );
                    println!("{}", serde_json::to_string_pretty(info)?);
                }
                None => println!("no draft"),
            }
        }
        Commands::Post(args) => post(args, config, &store, &translator)?,
    }
    Ok(())
}

fn post<S: KeyValueStore>(
    args: PostArgs,
    config: &WizardConfig,
    store: &S,
    t: &Translator,
) -> Result<()> {
    let drafts = DraftStore::load(store, config);
    let mut wizard = WizardController::new(config, drafts, ObjectUrlRegistry::new(), LogNavigator);

    let mut files = Vec::with_capacity(args.photos.len());
    for path in &args.photos {
        let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        files.push(MediaFile::new(name, bytes));
    }

    let features = [
        (fields::BEDROOMS, args.bedrooms),
        (fields::BATHROOMS, args.bathrooms),
        (fields::AMENITIES, args.amenities),
        (fields::DESCRIPTION, args.description),
    ];
    let mut inputs = vec![
        RawInput::new()
            .with(fields::PROPERTY_TYPE, args.property_type)
            .with(fields::TRANSACTION_TYPE, args.transaction)
            .with(fields::ASKING_PRICE, args.price)
            .with(fields::AREA_SQM, args.area)
            .with(fields::ADDRESS, args.address),
        given(RawInput::new(), [(fields::VIDEO_LINK, args.video_link)]),
        given(RawInput::new(), features),
        RawInput::new().with(fields::CONFIRMED, args.confirm.to_string()),
    ]
    .into_iter();

    let outcome = wizard.media_mut().add(files);
    if outcome.notice.is_some() {
        println!("{}", t.t("post_ad.photos.capacity_notice"));
    }

    loop {
        let step = wizard.current_step().clone();
        println!(
            "{}: {} ({}% {})",
            t.t("post_ad.title"),
            t.t(step.label_key),
            wizard.progress_percent(),
            t.t("post_ad.completed")
        );

        let Some(raw) = inputs.next() else {
            bail!("no input for step {}", step.id);
        };
        match wizard.submit_step(raw) {
            SubmitOutcome::Advanced { .. } => continue,
            SubmitOutcome::Completed => break,
            SubmitOutcome::Rejected(errors) => {
                for error in errors.iter() {
                    eprintln!("  {}: {}", error.field, error.message);
                }
                bail!("step {} did not validate", step.id);
            }
        }
    }

    if let Some(cover) = wizard.media().primary_entry() {
        println!("{}: {}", t.t("post_ad.photos.main_photo"), cover.display_name);
    }
    println!("{}", t.t("post_ad.done"));
    let photos = wizard.media().len();
    let draft = wizard.finish();
    info!(photos, steps = draft.completed_steps().count(), "listing ready");
    Ok(())
}

/// Add only the flags that were given; absent flags stay absent fields.
fn given<const N: usize>(raw: RawInput, values: [(&str, Option<String>); N]) -> RawInput {
    values.into_iter().fold(raw, |raw, (field, value)| match value {
        Some(value) => raw.with(field, value),
        None => raw,
    })
}
