// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Runebender edit behaviors: rule-driven point editing for glyph outlines
//!
//! The core is [`editing::EditBehavior`], which matches every point of a
//! contour against a table of neighborhood patterns and moves it with the
//! action the first matching rule names. Skeleton editing, rib (stroke
//! width) dragging and Tunni point geometry build on the same model.

pub mod cli;
pub mod editing;
pub mod geom;
pub mod path;
pub mod settings;
pub mod skeleton;
pub mod tunni;

use anyhow::{Context, Result};
use std::io::Write;

/// Entry point for the gesture replay tool
///
/// `args` are the command-line arguments without the program name.
pub fn run(args: &[String]) -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("runebender_behavior=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = args.first() else {
        anyhow::bail!("Usage: runebender-behavior <gesture.json|gesture.toml>");
    };

    tracing::info!("Loading gesture from: {}", path);
    let gesture = cli::GestureFile::load(path)
        .with_context(|| format!("Failed to load gesture {}", path))?;
    let replay = gesture.replay();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for frame in &replay.frames {
        writeln!(out, "{}", serde_json::to_string(frame)?)?;
    }
    writeln!(out, "{}", serde_json::to_string(&replay.rollback)?)?;
    Ok(())
}
