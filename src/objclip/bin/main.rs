//-- objclip

#[macro_use]
extern crate log; //info/debug/error

mod clip;

use clap::Parser;
use num_format::{Locale, ToFormattedString};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use clip::{ClipError, ClipResult, Stats};

#[derive(Parser)]
#[command(name = "objclip")]
#[command(about = "clip an OBJ mesh -- drop the triangles above a height [objclip]")]
#[command(author, version)]
struct Cli {
    /// input OBJ file
    infile: PathBuf,
    /// output OBJ file
    outfile: PathBuf,
    /// keep a triangle only if its 3 vertices have y below this
    #[arg(long, default_value_t = clip::DEFAULT_HEIGHT)]
    height: f64,
    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            //-- usage errors exit with -1, as 255 on POSIX
            std::process::exit(if e.use_stderr() { 255 } else { 0 });
        }
    };
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    info!("===== objclip =====");
    match run(&cli) {
        Ok(stats) => {
            info!("# vertices: {}", stats.vertices.to_formatted_string(&Locale::en));
            info!("# triangles kept: {}", stats.faces_kept.to_formatted_string(&Locale::en));
            info!(
                "# triangles dropped: {}",
                stats.faces_dropped.to_formatted_string(&Locale::en)
            );
            info!("# other lines: {}", stats.other.to_formatted_string(&Locale::en));
            info!("✅");
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> ClipResult<Stats> {
    let fi = File::open(&cli.infile).map_err(|e| ClipError::Open(cli.infile.clone(), e))?;
    let fo = File::create(&cli.outfile).map_err(|e| ClipError::Open(cli.outfile.clone(), e))?;
    info!(
        "{} -> {} (height < {})",
        cli.infile.display(),
        cli.outfile.display(),
        cli.height
    );
    clip::clip(BufReader::new(fi), BufWriter::new(fo), cli.height)
}
