use clap::Parser;
use color_eyre::eyre::Report;
use social_media::Settings;
use social_media::layers::ErrorLayer;

#[tokio::main]
async fn main() -> Result<(), Report> {
    ErrorLayer.setup()?;
    let settings = Settings::parse();
    social_media::run(settings).await
}
