use std::sync::mpsc::{self, Receiver};
use std::thread;

/// Serves the same canned response to every request on a random local port.
/// Returns the base url and a receiver yielding each requested path.
pub(crate) fn serve(status: u16, content_type: &str, body: Vec<u8>) -> (String, Receiver<String>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind fixture server");
    let port = server
        .server_addr()
        .to_ip()
        .map(|addr| addr.port())
        .expect("fixture server port");
    let content_type = content_type.to_string();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for request in server.incoming_requests() {
            let _ = tx.send(request.url().to_string());

            let header = tiny_http::Header::from_bytes("Content-Type", content_type.as_bytes())
                .expect("content type header");
            let response = tiny_http::Response::from_data(body.clone())
                .with_status_code(status)
                .with_header(header);
            let _ = request.respond(response);
        }
    });

    (format!("http://127.0.0.1:{}", port), rx)
}

pub(crate) fn serve_json(status: u16, body: &str) -> (String, Receiver<String>) {
    serve(status, "application/json", body.as_bytes().to_vec())
}

/// Talks to the fixture server directly, whatever proxy the environment sets.
pub(crate) fn client() -> reqwest::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder().no_proxy().build()
}
