use std::path::PathBuf;
use std::process::ExitCode;

use layout_render::config::RenderJob;
use layout_render::output::PngFileSink;
use layout_render::pipeline;
use layout_render::render::backends::null::NullEngine;
use layout_render::resources::{FolderResourceStore, ResourceStore};

/// Usage: render_sample <project dir> [framework res dir] [output.png]
///
/// Without a framework directory the project must define `AppTheme`, which is
/// then used as a project theme.
fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(project_root) = args.next().map(PathBuf::from) else {
        eprintln!("usage: render_sample <project dir> [framework res dir] [output.png]");
        return ExitCode::from(2);
    };
    let framework_dir = args.next().map(PathBuf::from);
    let output = args.next().map(PathBuf::from);

    // Configure the job through the builder. The defaults describe a 1280x800
    // landscape tablet rendering the `main` layout with the framework `Theme`.
    let mut builder = RenderJob::builder().project_root(&project_root);
    if framework_dir.is_none() {
        builder = builder.project_theme("AppTheme");
    }
    if let Some(output) = output {
        builder = builder.output(output);
    }
    let job = builder.build().expect("render job is not valid");

    // Resource stores are loaded lazily by the pipeline.
    let mut project = FolderResourceStore::new(job.resource_dir(), false);
    let mut framework = framework_dir.map(|dir| FolderResourceStore::new(dir, true));

    // The null engine does not draw anything, but produces a screen-sized
    // image and a root view, which is enough to exercise the whole flow.
    let mut engine = NullEngine::new();

    let result = pipeline::run(
        &job,
        &mut project,
        framework.as_mut().map(|f| f as &mut dyn ResourceStore),
        &mut engine,
        &mut PngFileSink,
    );

    match result {
        Ok(report) => {
            println!("Image written to {}", report.destination.display());
            print!("{}", report.listing());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Render failed ({:?}): {}", e.kind(), e);
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
