use crate::config::load_config;
use crate::ingest::{Delimiter, parse_table};
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::render::{render_svg, write_output_svg};
use crate::theme::{Background, Theme};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "fbd", version, about = "Ishikawa (fishbone) diagram renderer")]
pub struct Args {
    /// Input table (.csv/.tsv) or '-' for stdin. Columns by position:
    /// Classification, Category, Cause, Sub-cause.
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Problem statement rendered in the fish head
    #[arg(short = 't', long = "title", default_value = "")]
    pub title: String,

    /// Config JSON file (theme/layout/render sections)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Background preset
    #[arg(long = "background", value_enum)]
    pub background: Option<BackgroundArg>,

    /// Spine and branch line color
    #[arg(long = "line-color")]
    pub line_color: Option<String>,

    /// Classification label color
    #[arg(long = "classification-color")]
    pub classification_color: Option<String>,

    /// Cause label color
    #[arg(long = "cause-color")]
    pub cause_color: Option<String>,

    /// Sub-cause label color
    #[arg(long = "subcause-color")]
    pub subcause_color: Option<String>,

    /// Cell delimiter; inferred from the input extension when omitted
    #[arg(long = "delimiter", value_enum)]
    pub delimiter: Option<DelimiterArg>,

    /// Raster scale for PNG output
    #[arg(long = "scale")]
    pub scale: Option<f32>,

    /// Write the computed primitive sequence as JSON to this path
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum BackgroundArg {
    White,
    Transparent,
    Linen,
    Slate,
    Midnight,
}

impl From<BackgroundArg> for Background {
    fn from(value: BackgroundArg) -> Self {
        match value {
            BackgroundArg::White => Background::White,
            BackgroundArg::Transparent => Background::Transparent,
            BackgroundArg::Linen => Background::Linen,
            BackgroundArg::Slate => Background::Slate,
            BackgroundArg::Midnight => Background::Midnight,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum DelimiterArg {
    Comma,
    Semicolon,
    Tab,
}

impl From<DelimiterArg> for Delimiter {
    fn from(value: DelimiterArg) -> Self {
        match value {
            DelimiterArg::Comma => Delimiter::Comma,
            DelimiterArg::Semicolon => Delimiter::Semicolon,
            DelimiterArg::Tab => Delimiter::Tab,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config.theme, &args);
    if let Some(scale) = args.scale {
        config.render.scale = scale;
    }

    let delimiter = resolve_delimiter(&args);
    let input = read_input(args.input.as_deref())?;
    let tree = parse_table(&input, delimiter)?;

    let layout = compute_layout(&tree, &args.title, &config.theme, &config.layout);
    if let Some(dump_path) = args.dump_layout.as_deref() {
        write_layout_dump(dump_path, &layout)?;
    }

    let svg = render_svg(&layout, &config.theme);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = args
                .output
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
            write_png(&svg, output, &config)?;
        }
    }

    Ok(())
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &crate::config::Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &crate::config::Config) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires building with the 'png' feature"
    ))
}

fn apply_overrides(theme: &mut Theme, args: &Args) {
    if let Some(background) = args.background {
        *theme = Theme::for_background(background.into());
    }
    if let Some(v) = &args.line_color {
        theme.spine_color = v.clone();
    }
    if let Some(v) = &args.classification_color {
        theme.classification_label_color = v.clone();
    }
    if let Some(v) = &args.cause_color {
        theme.cause_label_color = v.clone();
    }
    if let Some(v) = &args.subcause_color {
        theme.subcause_label_color = v.clone();
    }
}

fn resolve_delimiter(args: &Args) -> Delimiter {
    if let Some(delimiter) = args.delimiter {
        return delimiter.into();
    }
    args.input
        .as_deref()
        .and_then(|path| path.extension())
        .and_then(|ext| ext.to_str())
        .map(Delimiter::from_extension)
        .unwrap_or(Delimiter::Comma)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
