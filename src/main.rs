use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use toolshub::batch::{self, ResizeBounds};
use toolshub::calculators::{self, CivilDate, Course};
use toolshub::color::{self, Rgb};
use toolshub::gradient::{self, ColorStop, GradientKind};
use toolshub::imaging::{self, Dimensions, Quality, RustBackend};
use toolshub::logging::{LoggingConfig, init_logging};
use toolshub::password::{self, PasswordOptions};
use toolshub::units::{self, Unit};
use toolshub::{config, encoding, generators, output};

#[derive(Parser)]
#[command(name = "toolshub")]
#[command(about = "Everyday developer utilities: colors, images, passwords, calculators")]
#[command(long_about = "\
Everyday developer utilities: colors, images, passwords, calculators

Every tool is a pure function of its arguments. Image tools read and write
local files; nothing touches the network.

Defaults for the password generator, gradient builder and image encoders
come from toolshub.toml in the current directory (or --config DIR).
Command-line flags override the file.

Run 'toolshub gen-config' to generate a documented toolshub.toml.")]
#[command(version = env!("TOOLSHUB_VERSION"))]
struct Cli {
    /// Directory containing toolshub.toml
    #[arg(long, global = true, value_name = "DIR")]
    config: Option<PathBuf>,

    /// Print debug logs to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a color between hex, RGB and HSL
    #[command(subcommand)]
    Color(ColorCommand),
    /// Build a CSS gradient from color stops ("red 0", "#00f@100%")
    Gradient {
        #[arg(required = true, value_parser = ColorStop::parse)]
        stops: Vec<ColorStop>,
        /// Angle in degrees (linear only)
        #[arg(long, allow_negative_numbers = true)]
        angle: Option<f64>,
        /// linear or radial
        #[arg(long)]
        kind: Option<GradientKind>,
    },
    /// Compute the size an image would be resized to, without touching files
    ResizeDims {
        width: u32,
        height: u32,
        #[command(flatten)]
        bounds: BoundsArgs,
    },
    /// Resize an image to fit within bounds, preserving aspect ratio
    Resize {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        bounds: BoundsArgs,
        #[command(flatten)]
        quality: QualityArgs,
    },
    /// Re-encode an image; the format follows the output extension
    Convert {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        quality: QualityArgs,
    },
    /// Write a square favicon set (PNG per size plus favicon.ico)
    Favicon {
        input: PathBuf,
        output_dir: PathBuf,
        /// Comma-separated edge sizes
        #[arg(long, value_delimiter = ',')]
        sizes: Vec<u32>,
    },
    /// Resize every image under a directory in parallel
    Batch {
        input_dir: PathBuf,
        output_dir: PathBuf,
        #[command(flatten)]
        bounds: BoundsArgs,
        #[command(flatten)]
        quality: QualityArgs,
    },
    /// Check or generate passwords
    #[command(subcommand)]
    Password(PasswordCommand),
    /// Generate random (v4) UUIDs
    Uuid {
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,
    },
    /// Hex digest of a string
    Hash {
        text: String,
        /// sha224, sha256, sha384, sha512 or all
        #[arg(long, short, default_value = "sha256")]
        algorithm: String,
    },
    /// Percent-encode or decode a URL component
    #[command(subcommand)]
    Url(UrlCommand),
    /// Age, BMI, loan, percentage and GPA calculators
    #[command(subcommand)]
    Calc(CalcCommand),
    /// Convert a value between units of the same kind
    Units {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        from: Unit,
        to: Unit,
    },
    /// Print a stock toolshub.toml with all options documented
    GenConfig,
}

#[derive(Subcommand)]
enum ColorCommand {
    /// From a hex code (#ff8000 or ff8000)
    Hex { value: String },
    /// From RGB channels (0-255; out-of-range values are clamped)
    Rgb {
        #[arg(allow_negative_numbers = true)]
        r: f64,
        #[arg(allow_negative_numbers = true)]
        g: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
    },
    /// From hue (degrees), saturation and lightness (percent)
    Hsl {
        #[arg(allow_negative_numbers = true)]
        h: f64,
        #[arg(allow_negative_numbers = true)]
        s: f64,
        #[arg(allow_negative_numbers = true)]
        l: f64,
    },
}

#[derive(Subcommand)]
enum PasswordCommand {
    /// Score a password and suggest improvements
    Check { password: String },
    /// Generate random passwords
    Generate(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(long, short)]
    length: Option<usize>,
    #[arg(long, short = 'n', default_value_t = 1)]
    count: usize,
    #[arg(long)]
    no_lowercase: bool,
    #[arg(long)]
    no_uppercase: bool,
    #[arg(long)]
    no_digits: bool,
    #[arg(long)]
    no_symbols: bool,
    /// Leave out 0 O 1 l I
    #[arg(long)]
    exclude_ambiguous: bool,
}

#[derive(Subcommand)]
enum UrlCommand {
    Encode { text: String },
    Decode { text: String },
}

#[derive(Subcommand)]
enum CalcCommand {
    /// Age from a birth date (YYYY-MM-DD)
    Age {
        #[arg(value_parser = CivilDate::parse)]
        birth: CivilDate,
        /// Reference date (default: today, UTC)
        #[arg(long, value_parser = CivilDate::parse)]
        on: Option<CivilDate>,
    },
    /// Body mass index from kg and cm (or lb and in with --imperial)
    Bmi {
        weight: f64,
        height: f64,
        #[arg(long)]
        imperial: bool,
    },
    /// Monthly payment for a fixed-rate loan
    Loan {
        principal: f64,
        /// Annual rate in percent
        rate: f64,
        years: u32,
        /// Print the month-by-month amortization table
        #[arg(long)]
        schedule: bool,
    },
    /// Percentage arithmetic
    #[command(subcommand)]
    Percent(PercentCommand),
    /// Grade point average from GRADE:CREDITS pairs (A-:3 B+:4)
    Gpa {
        #[arg(required = true, value_parser = Course::parse)]
        courses: Vec<Course>,
    },
}

#[derive(Subcommand)]
enum PercentCommand {
    /// PERCENT% of VALUE
    Of {
        #[arg(allow_negative_numbers = true)]
        percent: f64,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// What percent PART is of WHOLE
    What {
        #[arg(allow_negative_numbers = true)]
        part: f64,
        #[arg(allow_negative_numbers = true)]
        whole: f64,
    },
    /// Change from FROM to TO, in percent
    Change {
        #[arg(allow_negative_numbers = true)]
        from: f64,
        #[arg(allow_negative_numbers = true)]
        to: f64,
    },
}

/// Bounding box flags shared by the resize commands.
#[derive(Args, Clone, Copy)]
struct BoundsArgs {
    #[arg(long, allow_negative_numbers = true)]
    max_width: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    max_height: Option<i64>,
}

/// Encoding quality flag shared by the commands that write images.
#[derive(Args, Clone, Copy)]
struct QualityArgs {
    /// JPEG quality 1-100 (default from config)
    #[arg(long)]
    quality: Option<u32>,
}

impl QualityArgs {
    fn resolve(self, config: &config::ToolsConfig) -> Quality {
        Quality::new(self.quality.unwrap_or(config.images.quality))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::from_verbosity(cli.verbose));

    let config_dir = cli.config.clone().unwrap_or_else(|| PathBuf::from("."));
    let load_config = || config::load_config(&config_dir);
    let json = cli.json;

    match cli.command {
        Command::Color(command) => {
            let rgb = match command {
                ColorCommand::Hex { value } => color::hex_to_rgb(&value)?,
                ColorCommand::Rgb { r, g, b } => color::hex_to_rgb(&color::rgb_to_hex(r, g, b))?,
                ColorCommand::Hsl { h, s, l } => color::hsl_to_rgb(h, s, l),
            };
            let hsl = rgb.to_hsl();
            emit(
                json,
                &ColorReport {
                    hex: rgb.to_hex(),
                    rgb,
                    hsl: hsl.to_css(),
                },
                output::format_color(rgb, hsl),
            )?;
        }
        Command::Gradient { stops, angle, kind } => {
            let defaults = load_config()?.gradient;
            let css = gradient::generate_gradient_css(
                &stops,
                angle.unwrap_or(defaults.angle),
                kind.unwrap_or(defaults.kind),
            );
            emit(json, &css, vec![css.clone()])?;
        }
        Command::ResizeDims {
            width,
            height,
            bounds,
        } => {
            let original = Dimensions { width, height };
            let resized = imaging::calculate_resize_dimensions(
                width,
                height,
                bounds.max_width,
                bounds.max_height,
            );
            emit(
                json,
                &ResizeReport { original, resized },
                output::format_resize_dimensions(original, resized),
            )?;
        }
        Command::Resize {
            input,
            output: dest,
            bounds,
            quality,
        } => {
            let config = load_config()?;
            let dimensions = imaging::resize_image(
                &RustBackend::new(),
                &input,
                &dest,
                bounds.max_width,
                bounds.max_height,
                quality.resolve(&config),
            )?;
            emit(
                json,
                &dimensions,
                output::format_resized_file(&dest, dimensions),
            )?;
        }
        Command::Convert {
            input,
            output: dest,
            quality,
        } => {
            let config = load_config()?;
            let backend = RustBackend::new();
            imaging::convert_image(&backend, &input, &dest, quality.resolve(&config))?;
            let dimensions = imaging::get_dimensions(&backend, &dest)?;
            emit(
                json,
                &dimensions,
                output::format_resized_file(&dest, dimensions),
            )?;
        }
        Command::Favicon {
            input,
            output_dir,
            sizes,
        } => {
            let config = load_config()?;
            let sizes = if sizes.is_empty() {
                config.images.favicon_sizes
            } else {
                sizes
            };
            let favicons =
                imaging::create_favicon_set(&RustBackend::new(), &input, &output_dir, &sizes)?;
            emit(json, &favicons, output::format_favicons(&favicons))?;
        }
        Command::Batch {
            input_dir,
            output_dir,
            bounds,
            quality,
        } => {
            let config = load_config()?;
            run_batch(&config, &input_dir, &output_dir, bounds, quality, json)?;
        }
        Command::Password(PasswordCommand::Check { password }) => {
            let analysis = password::analyze_password(&password);
            emit(
                json,
                &analysis,
                output::format_password_analysis(&analysis),
            )?;
        }
        Command::Password(PasswordCommand::Generate(args)) => {
            let options = args.options(load_config()?.password);
            let passwords = (0..args.count)
                .map(|_| password::generate_password_default(&options))
                .collect::<Result<Vec<_>, _>>()?;
            emit(json, &passwords, passwords.clone())?;
        }
        Command::Uuid { count } => {
            let mut rng = rand::rng();
            let uuids: Vec<String> = (0..count).map(|_| generators::uuid_v4(&mut rng)).collect();
            emit(json, &uuids, uuids.clone())?;
        }
        Command::Hash { text, algorithm } => {
            let algorithms = if algorithm.eq_ignore_ascii_case("all") {
                generators::HashAlgorithm::ALL.to_vec()
            } else {
                vec![algorithm.parse::<generators::HashAlgorithm>()?]
            };
            let hashes: Vec<_> = algorithms
                .into_iter()
                .map(|a| (a, generators::hash_hex(a, text.as_bytes())))
                .collect();
            let report: serde_json::Map<String, serde_json::Value> = hashes
                .iter()
                .map(|(a, digest)| (a.name().to_string(), digest.clone().into()))
                .collect();
            emit(json, &report, output::format_hashes(&hashes))?;
        }
        Command::Url(command) => {
            let result = match command {
                UrlCommand::Encode { text } => encoding::url_encode(&text),
                UrlCommand::Decode { text } => encoding::url_decode(&text)?,
            };
            emit(json, &result, vec![result.clone()])?;
        }
        Command::Calc(command) => run_calc(command, json)?,
        Command::Units { value, from, to } => {
            let converted = units::convert(value, from, to)?;
            emit(
                json,
                &converted,
                vec![format!(
                    "{} {} = {} {}",
                    output::trim_float(value, 6),
                    from,
                    output::trim_float(converted, 6),
                    to
                )],
            )?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct ColorReport {
    hex: String,
    rgb: Rgb,
    hsl: String,
}

#[derive(Serialize)]
struct ResizeReport {
    original: Dimensions,
    resized: Dimensions,
}

impl GenerateArgs {
    /// Config values with the command-line switches applied on top.
    fn options(&self, mut options: PasswordOptions) -> PasswordOptions {
        if let Some(length) = self.length {
            options.length = length;
        }
        options.lowercase &= !self.no_lowercase;
        options.uppercase &= !self.no_uppercase;
        options.digits &= !self.no_digits;
        options.symbols &= !self.no_symbols;
        options.exclude_ambiguous |= self.exclude_ambiguous;
        options
    }
}

/// Print `value` as JSON or the human-readable `lines`.
fn emit<T: Serialize + ?Sized>(
    json: bool,
    value: &T,
    lines: Vec<String>,
) -> Result<(), Box<dyn Error>> {
    if json {
        output::print_json(value)?;
    } else {
        output::print_lines(&lines);
    }
    Ok(())
}

fn run_batch(
    config: &config::ToolsConfig,
    input_dir: &Path,
    output_dir: &Path,
    bounds: BoundsArgs,
    quality: QualityArgs,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    init_thread_pool(&config.processing);

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            if !json {
                output::print_lines(&output::format_batch_event(&event));
            }
        }
    });
    let summary = batch::resize_directory(
        &RustBackend::new(),
        input_dir,
        output_dir,
        ResizeBounds {
            max_width: bounds.max_width,
            max_height: bounds.max_height,
        },
        quality.resolve(config),
        Some(tx),
    )?;
    printer
        .join()
        .map_err(|_| "batch progress printer panicked")?;

    emit(json, &summary, output::format_batch_summary(&summary))?;
    if summary.failed > 0 {
        let total = summary.failed + summary.resized;
        return Err(format!("{} of {} images failed", summary.failed, total).into());
    }
    Ok(())
}

fn run_calc(command: CalcCommand, json: bool) -> Result<(), Box<dyn Error>> {
    match command {
        CalcCommand::Age { birth, on } => {
            let on = match on {
                Some(date) => date,
                None => CivilDate::today()?,
            };
            let age = calculators::calculate_age(birth, on)?;
            emit(json, &age, output::format_age(&age))?;
        }
        CalcCommand::Bmi {
            weight,
            height,
            imperial,
        } => {
            let bmi = if imperial {
                calculators::calculate_bmi_imperial(weight, height)?
            } else {
                calculators::calculate_bmi(weight, height)?
            };
            emit(json, &bmi, output::format_bmi(&bmi))?;
        }
        CalcCommand::Loan {
            principal,
            rate,
            years,
            schedule,
        } => {
            let summary = calculators::calculate_loan(principal, rate, years)?;
            let rows = if schedule {
                Some(calculators::amortization_schedule(principal, rate, years)?)
            } else {
                None
            };
            let lines = output::format_loan(&summary, rows.as_deref());
            match rows {
                Some(rows) if json => output::print_json(&serde_json::json!({
                    "summary": summary,
                    "schedule": rows,
                }))?,
                _ => emit(json, &summary, lines)?,
            }
        }
        CalcCommand::Percent(command) => {
            let value = match command {
                PercentCommand::Of { percent, value } => calculators::percent_of(percent, value),
                PercentCommand::What { part, whole } => calculators::what_percent(part, whole)?,
                PercentCommand::Change { from, to } => calculators::percent_change(from, to)?,
            };
            emit(json, &value, output::format_number(value))?;
        }
        CalcCommand::Gpa { courses } => {
            let gpa = calculators::calculate_gpa(&courses)?;
            emit(json, &gpa, vec![format!("GPA {:.2}", gpa)])?;
        }
    }
    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. Users can lower it, not raise it.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
