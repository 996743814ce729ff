//! Package command implementation.

use crate::cli::PackageArgs;
use crate::error::add_package_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use crate::progress::LineProgress;
use anyhow::Result;
use skillpack_core::NoopProgress;
use skillpack_core::PackageConfig;
use skillpack_core::PackageRequest;
use skillpack_core::Packager;
use tracing::debug;

pub fn execute(args: &PackageArgs, formatter: &dyn OutputFormatter, silent: bool) -> Result<()> {
    let mut config = PackageConfig::default();
    if let Some(level) = args.compression_level {
        config = config.with_compression_level(Some(level));
    }
    debug!(?config, "package configuration");
    let packager = Packager::new(config);

    let mut request = PackageRequest::new(&args.source);
    if let Some(dir) = &args.output_dir {
        request = request.with_output_dir(dir);
    }

    formatter.format_package_start(&args.source, args.output_dir.as_deref());

    let prepared = add_package_context(packager.prepare(&request), &args.source)?;
    formatter.format_validation(&prepared.validation_message);
    if !prepared.patterns.is_empty() {
        formatter.format_patterns(prepared.patterns.len(), &packager.config().ignore_file);
    }

    // Progress bar on a TTY, plain "Added:" lines otherwise
    let result = if silent {
        packager.build(&prepared, &mut NoopProgress)
    } else if CliProgress::should_show() {
        let mut progress = CliProgress::new("Packaging");
        packager.build(&prepared, &mut progress)
    } else {
        let mut progress = LineProgress::new();
        packager.build(&prepared, &mut progress)
    };
    let report = add_package_context(result, &args.source)?;

    formatter.format_package_result(&report, &packager.config().ignore_file)?;

    Ok(())
}
