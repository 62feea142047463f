use anyhow::{Context, Result};
use std::io::{Read, Write};
use valhalla::{Action, ActorProviding};

use super::EngineArgs;

pub fn run(engine: EngineArgs, action: Action, request: Option<String>) -> Result<()> {
    let actor = engine.build()?;

    let response = execute(&actor, action, request, std::io::stdin().lock())?;

    write_response(&mut std::io::stdout().lock(), &response)
}

/// Run one request. The request comes from `stdin` when it is omitted or `-`.
fn execute<A, R>(actor: &A, action: Action, request: Option<String>, mut stdin: R) -> Result<String>
where
    A: ActorProviding,
    A::Error: std::error::Error + Send + Sync + 'static,
    R: Read,
{
    let request = match request {
        Some(request) if request != "-" => request,
        _ => {
            let mut request = String::new();
            stdin
                .read_to_string(&mut request)
                .context("Failed to read request from stdin")?;
            request
        }
    };

    action
        .invoke(actor, &request)
        .with_context(|| format!("{} request failed", action))
}

/// Write the response exactly as the engine returned it.
fn write_response<W: Write>(out: &mut W, response: &str) -> Result<()> {
    out.write_all(response.as_bytes())
        .and_then(|()| out.flush())
        .context("Failed to write response")
}
