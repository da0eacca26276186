//! Lambda entrypoint for the platform service.
//!
//! This executable expects to be interacted with according to AWS API
//! Gateway's "proxy event" protocol. The envelope translation lives in
//! the library crate; this is just the runtime wiring.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;

use platform_service_lambda::Service;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let svc = Service::init()?;
    let ref_svc = &svc;

    run(service_fn(|event: LambdaEvent<Value>| async move {
        let (payload, _context) = event.into_parts();
        ref_svc.handle_event(payload)
    }))
    .await?;
    Ok(())
}
