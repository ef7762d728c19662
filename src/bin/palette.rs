use clap::Parser;
use std::path::PathBuf;
use median_cut_palette::{Area, PaletteOptions, extract_palette_file};
use anyhow::{Result, bail};
use serde_json::json;

/// Print the dominant colors of images using median-cut quantization.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of colors to extract (capped at 16; rounded down to a power of two)
    #[arg(short = 'n', long, default_value_t = 8)]
    colors: usize,

    /// Region of interest as x,y,width,height in original image pixels.
    /// Defaults to the whole image. Cropped before --downscale is applied.
    #[arg(short, long, value_parser = parse_area)]
    area: Option<Area>,

    /// Shrink images so the longest side is at most this many pixels before sampling
    #[arg(short, long)]
    downscale: Option<u32>,

    /// Print a JSON document instead of one line per color
    #[arg(long)]
    json: bool,
}

fn parse_area(s: &str) -> Result<Area> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()?;
    let [x, y, width, height] = parts[..] else {
        bail!("expected x,y,width,height, got {s:?}");
    };
    Ok(Area { x, y, width, height })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let options = PaletteOptions {
        colors: args.colors,
        area: args.area,
        downscale: args.downscale,
    };

    let mut reports = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        let palette = extract_palette_file(input, &options)?;
        log::info!("{}: {} colors", input.display(), palette.len());

        if args.json {
            let colors: Vec<_> = palette
                .iter()
                .map(|c| json!({ "hex": c.to_hex(), "r": c.r, "g": c.g, "b": c.b }))
                .collect();
            reports.push(json!({ "path": input.display().to_string(), "palette": colors }));
        } else {
            println!("{}", input.display());
            for color in &palette {
                println!("  #{}  {color}", color.to_hex());
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_parses_four_numbers() {
        assert_eq!(
            parse_area("1,2,30,40").unwrap(),
            Area { x: 1, y: 2, width: 30, height: 40 }
        );
        assert_eq!(
            parse_area(" 0, 0 ,8,4").unwrap(),
            Area { x: 0, y: 0, width: 8, height: 4 }
        );
    }

    #[test]
    fn area_rejects_malformed_input() {
        for s in ["1,2,3", "1,2,3,4,5", "a,b,c,d", "", "1,-2,3,4"] {
            assert!(parse_area(s).is_err(), "{s:?}");
        }
    }

    #[test]
    fn cli_accepts_area_flag() {
        let args = Args::try_parse_from(["palette-cli", "-a", "0,0,32,32", "-d", "8", "img.png"]).unwrap();
        assert_eq!(args.area, Some(Area { x: 0, y: 0, width: 32, height: 32 }));
        assert_eq!(args.downscale, Some(8));
        assert!(Args::try_parse_from(["palette-cli", "-a", "0,0,32", "img.png"]).is_err());
    }
}
