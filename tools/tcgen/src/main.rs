use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tcgen::{generate, GenerateOpts};
use tcgen_pattern::EPROM_SIZE;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tcgen", version)]
#[command(
    about = "PRACTEL PT-430b EPROM code generator",
    after_help = "Example:\n  tcgen -t \"VK3DG GEELONG\" -o pattern.hex\n\n\
Outputs:\n  <name>.hex               Intel HEX file\n  <name>.bin               binary image\n  \
<name>_eprom_label.html  printable EPROM label\n  <name>.dump              raw hex dump (--debug)\n  \
<name>_id.txt            ID text bitmap (--debug)"
)]
struct Cli {
    /// Text to display (A-Z, 0-9, space, - and :; '_' is read as a space). At most 14 characters.
    #[arg(short, long)]
    text: String,

    /// Output file name; the extension is replaced for each output format.
    #[arg(short, long)]
    output: PathBuf,

    /// Also write the raw hex dump and ID text bitmap, and log at debug level.
    #[arg(short, long)]
    debug: bool,
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    println!(
        "PRACTEL PT-430b EPROM Code Generator v{}",
        env!("CARGO_PKG_VERSION")
    );

    let report = generate(&GenerateOpts {
        text: cli.text,
        output: cli.output,
        debug: cli.debug,
    })?;

    println!("ID text: {}", report.text);
    for file in &report.files {
        println!(
            "- {}: {} ({} bytes)",
            file.kind,
            file.path.display(),
            file.bytes
        );
    }
    println!("- EPROM size: {EPROM_SIZE} bytes");
    println!("EPROM pattern files completed successfully");
    Ok(())
}
