use std::path::PathBuf;

use clap::Parser;
use log::info;
use mailsift::{server, ArtifactStore, Classifier};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing vectorizer.json and model.json
    #[arg(short, long, default_value = "artifacts")]
    artifacts: PathBuf,

    /// Address to bind the web interface to
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    listen: String,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("=== Starting mailsift ===");

    // Both artifacts must load and agree on dimensionality before we accept
    // a single request; any failure here ends the process.
    let store = ArtifactStore::new(&args.artifacts);
    let classifier = Classifier::builder()
        .with_artifact_store(&store)?
        .build()?;

    let classifier_info = classifier.info();
    info!(
        "Classifier ready: {} vocabulary terms, {} feature columns",
        classifier_info.vocabulary_size, classifier_info.feature_dimension
    );

    server::serve(classifier, &args.listen).await?;
    Ok(())
}
