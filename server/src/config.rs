use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "sesmail", about = "Receives SES inbound mail notifications from SNS.")]
pub struct Opt {
    /// Config file, merged with SESMAIL_* environment variables
    #[arg(short, long)]
    pub config: Option<String>,

    /// Overrides the configured port
    #[arg(short, long)]
    pub port: Option<u16>,
}
