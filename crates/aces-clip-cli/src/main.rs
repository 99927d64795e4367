//! acesclip - ACESclip metadata inspector
//!
//! Loads an ACESclip XML file and prints the clip's transform chain.

use aces_clip::{ClipDescriptor, read_clip};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info, trace};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "acesclip")]
#[command(author, version, about = "Inspect ACESclip metadata files")]
#[command(long_about = "
Prints the clip identity and the ACES transform chain stored in an
ACESclip XML file.

Examples:
  acesclip ACESclip.output.xml
  acesclip -vv A001C003.ACESclip.xml     # with debug logging on stderr
")]
struct Cli {
    /// ACESclip XML file
    file: PathBuf,

    /// Verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_clip(clip: &ClipDescriptor) {
    println!("Application: {} {}", clip.application, clip.version);
    println!("Clip Name: {}", clip.clip_name);
    println!("Media Id:  {}", clip.media_id);
    println!("Clip Date: {}", clip.clip_date);
    if !clip.idt.is_empty() {
        println!("IDT: {}", clip.idt);
    }
    if !clip.link_itl.is_empty() {
        println!("Link ITL: {}", clip.link_itl);
    }
    if clip.has_grade() || !clip.cdl.is_identity() {
        println!("Grade: {} -> {} ({})", clip.convert_to, clip.convert_from, clip.grade_status);
        println!("  Slope:      {:?}", clip.cdl.slope);
        println!("  Offset:     {:?}", clip.cdl.offset);
        println!("  Power:      {:?}", clip.cdl.power);
        println!("  Saturation: {}", clip.cdl.saturation);
    }
    for (i, lmt) in clip.lmt.iter().enumerate() {
        println!("LMT {}: {}", i + 1, lmt);
    }
    if !clip.rrtodt.is_empty() {
        println!("RRTODT: {}", clip.rrtodt);
    }
    if !clip.rrt.is_empty() {
        println!("RRT: {}", clip.rrt);
    }
    if !clip.odt.is_empty() {
        println!("ODT: {}", clip.odt);
    }
    if !clip.link_ptl.is_empty() {
        println!("Link PTL: {}", clip.link_ptl);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    trace!(file = %cli.file.display(), "acesclip::main");
    info!(file = %cli.file.display(), "Reading clip metadata");

    let clip = read_clip(&cli.file)
        .with_context(|| format!("Failed to read: {}", cli.file.display()))?;
    debug!(lmts = clip.lmt.len(), "Decoded clip");

    print_clip(&clip);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn requires_exactly_one_file() {
        assert!(Cli::try_parse_from(["acesclip"]).is_err());
        assert!(Cli::try_parse_from(["acesclip", "a.xml", "b.xml"]).is_err());

        let cli = Cli::try_parse_from(["acesclip", "-vv", "a.xml"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("a.xml"));
        assert_eq!(cli.verbose, 2);
    }
}
