use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use image::{GrayImage, RgbaImage};
use shadowcast::ShadowParams;

#[derive(Parser, Debug)]
#[command(name = "shadowcast", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cast a shadow for a foreground cutout and composite it onto a background.
    Compose(ComposeArgs),
    /// Print the effective shadow parameters as JSON.
    Params(ParamArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Foreground image (RGBA cutout, or any layout when --mask is given).
    #[arg(long)]
    fg: PathBuf,

    /// Background image; must match the foreground's size.
    #[arg(long)]
    bg: PathBuf,

    /// Optional subject mask overriding the foreground's alpha.
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Directory receiving composite.png and shadow_only.png.
    #[arg(long, default_value = "outputs")]
    out_dir: PathBuf,

    /// Also write mask.png and shadow_mask.png.
    #[arg(long)]
    debug: bool,

    #[command(flatten)]
    params: ParamArgs,
}

#[derive(Args, Debug)]
struct ParamArgs {
    /// JSON parameter file; individual flags override its values.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Cast direction in degrees, clockwise (0 = right, 90 = down).
    #[arg(long, allow_negative_numbers = true)]
    angle: Option<f64>,

    /// Light elevation in degrees (90 = overhead).
    #[arg(long, allow_negative_numbers = true)]
    elevation: Option<f64>,

    /// Shadow length multiplier.
    #[arg(long)]
    shadow_scale: Option<f64>,

    /// Upper bound on the shear magnitude.
    #[arg(long)]
    max_shear: Option<f64>,

    /// Contact shadow falloff, as a fraction of the shadow extent.
    #[arg(long)]
    contact_fade: Option<f64>,

    /// Soft shadow falloff, as a fraction of the shadow extent.
    #[arg(long)]
    soft_fade: Option<f64>,
}

impl ParamArgs {
    fn resolve(&self) -> anyhow::Result<ShadowParams> {
        let mut p = match &self.params {
            Some(path) => ShadowParams::from_path(path)?,
            None => ShadowParams::default(),
        };
        let overrides = [
            (&mut p.light.angle, self.angle),
            (&mut p.light.elevation, self.elevation),
            (&mut p.light.shadow_scale, self.shadow_scale),
            (&mut p.light.max_shear, self.max_shear),
            (&mut p.fade.contact_fade, self.contact_fade),
            (&mut p.fade.soft_fade, self.soft_fade),
        ];
        for (slot, value) in overrides {
            if let Some(v) = value {
                *slot = v;
            }
        }
        p.validate()?;
        Ok(p)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Params(args) => cmd_params(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let params = args.params.resolve()?;
    let fg = shadowcast::open_image(&args.fg)?;
    let bg = shadowcast::open_image(&args.bg)?;
    let mask = args
        .mask
        .as_deref()
        .map(shadowcast::open_image)
        .transpose()?;

    let artifacts = shadowcast::compose_with_artifacts(&fg, &bg, mask.as_ref(), &params)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let outputs = &artifacts.outputs;
    write_rgba(&args.out_dir.join("composite.png"), &outputs.composite)?;
    write_rgba(&args.out_dir.join("shadow_only.png"), &outputs.shadow_only)?;
    if args.debug {
        write_gray(&args.out_dir.join("mask.png"), &artifacts.mask)?;
        write_gray(&args.out_dir.join("shadow_mask.png"), &artifacts.layers.projected)?;
    }
    Ok(())
}

fn cmd_params(args: ParamArgs) -> anyhow::Result<()> {
    let params = args.resolve()?;
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}

fn write_rgba(path: &Path, img: &RgbaImage) -> anyhow::Result<()> {
    let bytes = shadowcast::encode_png(img)?;
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn write_gray(path: &Path, img: &GrayImage) -> anyhow::Result<()> {
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
