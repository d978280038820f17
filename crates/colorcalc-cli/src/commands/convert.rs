//! Colorspace conversion command.
//!
//! Resolves `--from`/`--to`/`--fields` into a converter, then streams
//! stdin to stdout as CSV or fixed-size binary records.

use std::io::{self, BufRead, BufWriter, Write};

use anyhow::{Context, Result, bail};
use colorcalc_color::{ConversionRequest, ResolvedConversion};
use colorcalc_io::{
    BinaryReader, BinaryWriter, CsvReader, CsvWriter, Format, StreamProcessor, StreamStats,
};
use tracing::{debug, info, trace};

use crate::ConvertArgs;

/// Runs the convert command.
pub fn run(args: ConvertArgs) -> Result<()> {
    trace!(?args, "convert::run");
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.list {
        for line in colorcalc_color::list() {
            writeln!(out, "{line}")?;
        }
        return Ok(());
    }

    let request = request(&args);
    if args.input_fields {
        let names = request.input_field_names().context("cannot determine input fields")?;
        writeln!(out, "{}", names.join(","))?;
        return Ok(());
    }
    if args.output_fields {
        let names = request.output_field_names().context("cannot determine output fields")?;
        writeln!(out, "{}", names.join(","))?;
        return Ok(());
    }

    let resolved = request.resolve().context("invalid conversion")?;
    info!(spec = %resolved.spec, fields = %resolved.fields.join(","), "Converting");

    if args.output_format {
        let format = binary_format(&args)?.context("--output-format requires --binary")?;
        let map = resolved.field_map()?;
        format.check_fields(&map)?;
        let storage = resolved.spec.storage.storage_kind();
        writeln!(out, "{}", format.with_channels(&map, storage))?;
        return Ok(());
    }

    let stdin = io::stdin();
    let stats = convert_stream(&args, &resolved, stdin.lock(), BufWriter::new(out))?;
    info!(records = stats.records, "Done");
    Ok(())
}

/// Builds the conversion request from the command line.
///
/// Field names are split on the CSV delimiter as well as on commas.
fn request(args: &ConvertArgs) -> ConversionRequest {
    let fields = args.fields.as_ref().map(|fields| {
        fields
            .iter()
            .flat_map(|f| f.split(args.delimiter))
            .map(String::from)
            .collect()
    });
    ConversionRequest {
        from: args.from.clone(),
        to: args.to.clone(),
        input_type: args.input_type.clone(),
        output_type: args.output_type.clone(),
        fields,
    }
}

fn binary_format(args: &ConvertArgs) -> Result<Option<Format>> {
    args.binary
        .as_deref()
        .map(|s| Format::parse(s).with_context(|| format!("invalid binary format '{s}'")))
        .transpose()
}

/// Streams records from `input` to `output` through the resolved converter.
fn convert_stream<R: BufRead, W: Write>(
    args: &ConvertArgs,
    resolved: &ResolvedConversion,
    input: R,
    output: W,
) -> Result<StreamStats> {
    let map = resolved.field_map()?;
    let processor = StreamProcessor::new(resolved.converter()?, map).with_flush(args.flush);

    let stats = match binary_format(args)? {
        Some(format) => {
            format.check_fields(&map)?;
            debug!(%format, size = format.size(), "binary records");
            let mut reader = BinaryReader::new(input, format);
            let mut writer = BinaryWriter::new(output);
            processor.run(&mut reader, &mut writer)?
        }
        None => {
            if args.delimiter == '"' || args.delimiter == '\n' {
                bail!("invalid delimiter {:?}", args.delimiter);
            }
            debug!(delimiter = ?args.delimiter, "csv records");
            let mut reader = CsvReader::new(input, args.delimiter);
            let mut writer = CsvWriter::new(output, args.delimiter);
            processor.run(&mut reader, &mut writer)?
        }
    };
    Ok(stats)
}
