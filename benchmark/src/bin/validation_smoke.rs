// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Print first and second `validate` timings for every fixture, then check
//! that the empty few-constraints record is rejected.

use valbench_benchmark::{run_diagnostic, BenchContext};
use valbench_core::{PrewarmPolicy, ValidatorConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_writer(std::io::stderr)
        .init();

    let ctx = BenchContext::setup(&ValidatorConfig::default(), PrewarmPolicy::None)?;
    let stdout = std::io::stdout();
    run_diagnostic(&ctx, &mut stdout.lock())?;
    Ok(())
}
