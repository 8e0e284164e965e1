//! # ToolsHub
//!
//! Everyday developer utilities as a library and a command-line tool: color
//! conversion, CSS gradients, image resizing, password analysis and
//! generation, hashing, URL encoding, calculators and unit conversion.
//!
//! # Architecture: Independent Pure Tools
//!
//! Every tool is a self-contained module of pure functions. None of them
//! calls another, none keeps state between calls, and none does I/O except
//! the image backend and the batch runner:
//!
//! ```text
//! color       hex ⇄ RGB ⇄ HSL
//! gradient    color stops  →  CSS gradient string
//! imaging     dimensions   →  resized / converted / favicon files
//! password    password     →  score, feedback, crack time
//! ```
//!
//! Keeping the tools pure means each one is tested in isolation with plain
//! values, and the binary is a thin layer that parses arguments, calls one
//! function and formats the result.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`color`] | Hex, RGB and HSL conversions |
//! | [`gradient`] | CSS `linear-gradient` / `radial-gradient` strings from color stops |
//! | [`imaging`] | Aspect-preserving resize math, the `image`-crate backend, favicon sets |
//! | [`batch`] | Parallel directory resize with progress events |
//! | [`password`] | Heuristic strength scoring and random generation |
//! | [`generators`] | UUID v4 and SHA-2 digests |
//! | [`encoding`] | URL component percent-encoding |
//! | [`calculators`] | Age, BMI, loan, percentage and GPA |
//! | [`units`] | Length, mass, temperature and data-size conversion |
//! | [`config`] | `toolshub.toml` loading, validation and merging |
//! | [`logging`] | `env_logger` setup for the binary |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Pure-Rust Imaging
//!
//! The [`imaging`] module uses the `image` crate for decoding, Lanczos3
//! resampling and encoding. No ImageMagick, no system libraries: the binary
//! is self-contained. Operations go through the
//! [`ImageBackend`](imaging::ImageBackend) trait so tests can swap in a
//! recording mock and never touch pixels.
//!
//! ## Injected Randomness
//!
//! Generators that need randomness take the RNG as a parameter. The CLI
//! passes the thread-local RNG; tests pass a seeded `StdRng` and get
//! reproducible output.
//!
//! ## Total Functions Where Possible
//!
//! Color, gradient, resize and strength functions accept any numeric input
//! and clamp or wrap instead of failing. Parsing (hex codes, dates, units)
//! and the calculators return typed errors rather than NaN.

pub mod batch;
pub mod calculators;
pub mod color;
pub mod config;
pub mod encoding;
pub mod generators;
pub mod gradient;
pub mod imaging;
pub mod logging;
pub mod output;
pub mod password;
pub mod units;
