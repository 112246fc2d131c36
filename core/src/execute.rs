//! Execute a prepared call and interpret the response.
//!
//! Both execution modes end in [`process`]: error statuses become
//! [`ApiError::Http`], JSON bodies are decoded into the endpoint's model (or
//! returned as-is), and bodies that are not JSON come back as text.

use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::model::{Model, Output};
use crate::prepare::PreparedCall;
use crate::transport::{self, AsyncTransport, Transport};

/// Send `call` and block until the response is processed.
pub fn execute(transport: &dyn Transport, call: PreparedCall) -> Result<Output, ApiError> {
    let response = transport::send(transport, &call.request)?;
    process(call.model.as_ref(), response)
}

/// Send `call`, suspending only while the transport performs I/O.
pub async fn execute_async(
    transport: &dyn AsyncTransport,
    call: PreparedCall,
) -> Result<Output, ApiError> {
    let response = transport::send_async(transport, &call.request).await?;
    process(call.model.as_ref(), response)
}

/// Turn a transport response into the call's output.
pub fn process(model: Option<&Model>, response: HttpResponse) -> Result<Output, ApiError> {
    debug!(status = response.status, "response received");
    response.error_for_status()?;

    match response.json() {
        Ok(value) => match model {
            Some(model) => model.decode(value).map(Output::Model),
            None => Ok(Output::Json(value)),
        },
        Err(err) => {
            if !response.body.is_empty() {
                warn!(error = %err, "response body is not JSON, returning text");
            }
            Ok(Output::Text(response.body))
        }
    }
}
