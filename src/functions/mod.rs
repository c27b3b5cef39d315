//! Bundled functions built on the invocation contract.
//!
//! Each one is a complete [`ShsfFunction`](crate::function::ShsfFunction)
//! that the development host can serve.

mod custom_responses;
mod data_passing;
mod redirects;
mod routing;
mod secure_headers;

pub use custom_responses::CustomResponsesFunction;
pub use data_passing::DataPassingFunction;
pub use redirects::RedirectsFunction;
pub use routing::RoutingFunction;
pub use secure_headers::SecureHeadersFunction;

use crate::error::RegistryError;
use crate::function::ShsfFunction;

/// Every bundled function, ready for registration under its own name.
pub fn bundled() -> Result<Vec<Box<dyn ShsfFunction>>, RegistryError> {
    let functions: Vec<Box<dyn ShsfFunction>> = vec![
        Box::new(RoutingFunction::new()?),
        Box::new(CustomResponsesFunction::new()),
        Box::new(RedirectsFunction),
        Box::new(DataPassingFunction),
        Box::new(SecureHeadersFunction),
    ];
    Ok(functions)
}
