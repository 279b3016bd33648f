//! `soft_rend`
//!
//! Headless frame driver for the software pipeline: renders one frame and
//! writes the color attachment to a PNG file.
#![allow(unused_results)]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use dotenv::dotenv;
#[cfg(target_os = "linux")]
use tikv_jemallocator::Jemalloc;

mod driver;
use driver::{Driver, DriverConfiguration};
use soft_rend_pipeline::constants::{HEIGHT, NEAR_CLIP_PLANE_W, OUTPUT_PATH, WIDTH};
use soft_rend_pipeline::{FillRule, log_utils};

// Dependencies of the library crate.
#[cfg(test)]
use approx as _;
use derive_builder as _;
use enum_map as _;
use env_logger as _;
use nohash_hasher as _;
use smartstring as _;
use thiserror as _;

#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FillRuleArg {
    Inclusive,
    TopLeft,
}

impl From<FillRuleArg> for FillRule {
    fn from(arg: FillRuleArg) -> Self {
        match arg {
            FillRuleArg::Inclusive => FillRule::Inclusive,
            FillRuleArg::TopLeft => FillRule::TopLeft,
        }
    }
}

#[derive(Debug, Parser)]
struct Cli {
    #[arg(long = "width", default_value_t = WIDTH)]
    /// Frame width
    width: u32,

    #[arg(long = "height", default_value_t = HEIGHT)]
    /// Frame height
    height: u32,

    #[arg(long = "output", env = "SOFT_REND_OUTPUT", default_value = OUTPUT_PATH)]
    /// PNG file receiving the color attachment
    output: PathBuf,

    #[arg(long = "fill-rule", value_enum, default_value_t = FillRuleArg::Inclusive)]
    /// Tie-break for pixels lying exactly on a triangle edge
    fill_rule: FillRuleArg,

    #[arg(long = "near-clip-w", default_value_t = NEAR_CLIP_PLANE_W)]
    /// Clip-space w below which vertices count as behind the eye
    near_clip_w: f32,

    #[arg(long = "angle", default_value_t = 0.0)]
    /// Rotation of the triangle around the view axis, in degrees
    angle: f32,
}

impl From<Cli> for DriverConfiguration {
    fn from(cli: Cli) -> Self {
        DriverConfiguration::new(
            cli.width,
            cli.height,
            cli.output,
            cli.fill_rule.into(),
            cli.near_clip_w,
            cli.angle,
        )
    }
}

fn main() -> Result<()> {
    dotenv().ok();
    log_utils::init_logging()?;
    Driver::start(Cli::parse().into())
}
