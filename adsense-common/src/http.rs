use crate::*;
use anyhow::Context;
use log::debug;

fn body_to_str(b: hyper::body::Bytes) -> String {
    String::from_utf8(b.to_vec()).unwrap_or("[UTF-8 decode failed]".into())
}

/// This type is used as type parameter to the following functions, when `rq` is `None`.
#[derive(Debug, Serialize)]
pub struct EmptyRequest {}

/// Send a request and decode the JSON response. The Content-Type header is set automatically to
/// application/json. An empty response body results in `Resp::default()`.
pub async fn do_request<Req: Serialize + std::fmt::Debug, Resp: DeserializeOwned + Default>(
    cl: &TlsClient,
    path: &str,
    headers: &[(hyper::header::HeaderName, String)],
    http_method: &str,
    rq: Option<Req>,
) -> Result<Resp> {
    let mut reqb = hyper::Request::builder().uri(path).method(http_method);
    for (k, v) in headers {
        reqb = reqb.header(k, v);
    }
    reqb = reqb.header("Content-Type", "application/json");
    let body_str = match rq {
        Some(rq) => serde_json::to_string(&rq).context(format!("{:?}", rq))?,
        None => "".to_string(),
    };

    let body = if body_str == "null" {
        hyper::Body::from("")
    } else {
        hyper::Body::from(body_str)
    };

    let http_request = reqb.body(body)?;

    debug!("do_request: Launching HTTP request: {:?}", http_request);

    let http_response = cl.request(http_request).await?;
    let status = http_response.status();

    debug!(
        "do_request: HTTP response with status {} received: {:?}",
        status, http_response
    );

    let response_body = hyper::body::to_bytes(http_response.into_body()).await?;
    if !status.is_success() {
        Err(ApiError::HTTPResponseError(status, body_to_str(response_body)).into())
    } else if response_body.len() > 0 {
        // Evaluate body_to_str lazily
        serde_json::from_reader(response_body.as_ref())
            .map_err(|e| anyhow::Error::from(e).context(body_to_str(response_body)))
    } else {
        Ok(Default::default())
    }
}
