use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(60);
const ERROR_BODY_EXCERPT: usize = 240;

pub(crate) fn build_agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(CONNECT_TIMEOUT)
        .timeout_read(READ_TIMEOUT)
        .timeout_write(READ_TIMEOUT)
        .build()
}

pub(crate) fn get_text(
    agent: &ureq::Agent,
    url: &str,
    query: &[(&str, &str)],
) -> Result<String, String> {
    let mut request = agent.get(url);
    for (key, value) in query {
        request = request.query(key, value);
    }
    read_response(request.call())
}

pub(crate) fn post_form(
    agent: &ureq::Agent,
    url: &str,
    form: &[(&str, &str)],
) -> Result<String, String> {
    read_response(agent.post(url).send_form(form))
}

fn read_response(result: Result<ureq::Response, ureq::Error>) -> Result<String, String> {
    match result {
        Ok(response) => response
            .into_string()
            .map_err(|err| format!("response decode failed: {err}")),
        Err(ureq::Error::Status(status, response)) => {
            let response_body = response.into_string().ok().unwrap_or_default();
            let body = response_body.trim();
            if body.is_empty() {
                Err(format!("HTTP status {status}"))
            } else {
                let truncated = body.chars().take(ERROR_BODY_EXCERPT).collect::<String>();
                Err(format!("HTTP status {status} ({truncated})"))
            }
        }
        Err(ureq::Error::Transport(err)) => Err(format!("transport error: {err}")),
    }
}
