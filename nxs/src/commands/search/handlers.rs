use super::*;
use std::io::IsTerminal;

/// Handle the search command
pub async fn handle_search(ctx: &AppContext, args: &SearchArgs) {
    if let Err(e) = run(ctx, args).await {
        format::error(ctx, &format!("Error: {}", e));
        std::process::exit(1);
    }
}

async fn run(ctx: &AppContext, args: &SearchArgs) -> Result<(), String> {
    let rendered = match &args.input {
        Some(input) => filter_file(ctx, input)?,
        None => search_nexus(ctx, args).await?,
    };

    match &args.output {
        Some(path) => {
            let written = write_output(path, &rendered)?;
            format::success(ctx, &format!("Results saved to {}", written.display()));
        }
        None => print!("{}", terminate_line(&rendered)),
    }

    Ok(())
}

async fn search_nexus(ctx: &AppContext, args: &SearchArgs) -> Result<String, String> {
    let credentials = resolve_credentials(
        ctx.config.server.username.as_deref(),
        args.password.as_deref(),
        std::io::stdin().is_terminal(),
    )?;
    format::print(
        ctx,
        VerbosityLevel::VeryVerbose,
        if credentials.is_authenticated() {
            "Using Basic authentication"
        } else {
            "Using anonymous access"
        },
    );

    let nexus = build_nexus(ctx, credentials)?;
    search(ctx, &nexus, args).await
}
