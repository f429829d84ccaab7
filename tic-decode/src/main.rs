mod filter;
mod sink;
mod udp;

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use structopt::StructOpt;

use tic::decoder::Decoder;
use tic::dialect::{Historique, PmePmi, Standard};

use sink::{JsonSink, Mode, SinkConfig};

#[derive(StructOpt, Debug)]
#[structopt(
    about = "Decodes a French TIC (Télé-Information Client) electrical meter byte stream into JSON. \
             Exactly one of -1/-2/-P selects the meter's dialect."
)]
struct Opt {
    /// Historique dialect (original single-phase/three-phase meters).
    #[structopt(short = "1")]
    v01: bool,
    /// Standard dialect (current Linky meters).
    #[structopt(short = "2")]
    v02: bool,
    /// PME-PMI dialect (commercial/industrial meters).
    #[structopt(short = "P")]
    v01pme: bool,

    /// Emit one JSON object per frame, keyed by label, instead of a list.
    #[structopt(short = "d")]
    dict: bool,
    /// Include each field's human-readable description and unit.
    #[structopt(short = "l")]
    show_meta: bool,
    /// Emit one JSON object per field, one per line, instead of one array
    /// per frame (list mode only).
    #[structopt(short = "n")]
    one_per_line: bool,
    /// Decode PJOURF+1/PPOINTE into a structured day-profile array.
    #[structopt(short = "p")]
    decode_profile: bool,
    /// Re-render horodates as ISO-8601 instead of echoing them verbatim.
    #[structopt(short = "r")]
    iso_date: bool,
    /// Decode STGE into its named sub-fields instead of the raw integer.
    #[structopt(short = "u")]
    decode_stge: bool,
    /// Skip numeric fields whose value is zero.
    #[structopt(short = "z")]
    zero_mask: bool,

    /// Load a `#ticfilter` allow-list file.
    #[structopt(short = "e", name = "FILTER_FILE", parse(from_os_str))]
    filter_file: Option<PathBuf>,
    /// Tag every emitted frame with this id.
    #[structopt(short = "i", name = "ID")]
    id: Option<String>,
    /// Emit only every Nth frame.
    #[structopt(short = "s", name = "N", default_value = "1")]
    sample: u32,
    /// Forward output as UDP datagrams to host:port instead of stdout.
    #[structopt(long = "udp", name = "ADDR")]
    udp: Option<String>,

    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// Input file; reads stdin if omitted.
    #[structopt(name = "FILE", parse(from_os_str))]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    stderrlog::new()
        .module(module_path!())
        .verbosity(opt.verbose + 1)
        .init()
        .context("failed to initialize logging")?;

    match (opt.v01, opt.v02, opt.v01pme) {
        (true, false, false) => run::<Historique>(&opt),
        (false, true, false) => run::<Standard>(&opt),
        (false, false, true) => run::<PmePmi>(&opt),
        (false, false, false) => bail!("one of -1, -2, -P is required to select a dialect"),
        _ => bail!("-1, -2 and -P are mutually exclusive"),
    }
}

fn run<D: tic::dialect::Dialect>(opt: &Opt) -> Result<()> {
    let filter = match &opt.filter_file {
        Some(path) => Some(filter::load::<D>(path)?),
        None => None,
    };

    let config = SinkConfig {
        mode: if opt.dict { Mode::Dict } else { Mode::List },
        iso_date: opt.iso_date,
        show_meta: opt.show_meta,
        one_per_line: opt.one_per_line,
        decode_profile: opt.decode_profile,
        decode_stge: opt.decode_stge,
        zero_mask: opt.zero_mask,
        filter,
        id: opt.id.clone(),
        sample: opt.sample.max(1),
    };

    let input: Box<dyn Read> = match &opt.file {
        Some(path) => Box::new(File::open(path).with_context(|| format!("failed to open {}", path.display()))?),
        None => Box::new(io::stdin()),
    };
    let mut decoder = Decoder::<_, D>::new(input);

    match &opt.udp {
        Some(addr) => {
            let writer = udp::UdpWriter::connect(addr).with_context(|| format!("failed to connect to {addr}"))?;
            let mut sink = JsonSink::new(config, writer);
            decoder.run(&mut sink).context("decoder error")?;
            sink.into_inner().flush().context("failed to flush output")
        }
        None => {
            let writer = BufWriter::new(io::stdout());
            let mut sink = JsonSink::new(config, writer);
            decoder.run(&mut sink).context("decoder error")?;
            sink.into_inner().flush().context("failed to flush output")
        }
    }
}
