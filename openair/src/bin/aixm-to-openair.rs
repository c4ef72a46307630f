// SPDX-License-Identifier: Apache-2.0
// Copyright 2025, 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;

use aixm::{Document, GeometryResolver};
use clap::Parser;
use log::{error, info, warn};
use openair::{Converter, Error, Writer};

/// Converts AIXM 5.1.1 airspaces into OpenAir.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// AIXM file to read from.
    #[arg(short = 'x', long)]
    xml: PathBuf,

    /// OpenAir file to write to.
    #[arg(short, long)]
    output: PathBuf,

    /// Resolve all arcs and circles to points with the given degree step.
    #[arg(short, long, value_name = "STEP")]
    resolve: Option<u32>,

    /// Include the GeoBorders in the output.
    #[arg(short, long)]
    borders: bool,

    /// Include airspaces that only lend their geometry to others.
    #[arg(short, long)]
    all: bool,
}

fn run(args: &Args) -> Result<(usize, usize), Error> {
    let data = std::fs::read(&args.xml)?;
    let mut doc = Document::parse(&data)?;

    if doc.contains_curve_references() {
        warn!(
            "{} references curves of other documents that are left out",
            args.xml.display()
        );
    }

    if let Some(step) = args.resolve {
        GeometryResolver::new(step)?.resolve_document(&mut doc);
    }

    let converter = Converter::new(&doc);
    let records = converter.convert_airspaces(!args.all)?;

    let mut writer = Writer::new(BufWriter::new(File::create(&args.output)?));
    for record in &records {
        writer.write_record(record)?;
        writer.write_blank_line()?;
    }

    if args.borders {
        for border in converter.convert_borders() {
            writer.write_record(&border)?;
            writer.write_blank_line()?;
        }
    }

    writer.into_inner().flush()?;
    info!("wrote {}", args.output.display());

    Ok((doc.airspaces().len(), records.len()))
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    match run(&args) {
        Ok((airspaces, records)) => println!(
            "Converted {airspaces} AIXM airspaces into {records} OpenAir airspaces"
        ),
        Err(e) => {
            error!("failed to convert {}: {e}", args.xml.display());
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
