use http::StatusCode;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use zc_http::protocol::{Request, Response};

// Run with `cargo run --example parse` to see the decoder trace events.
fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let raw = "POST /q?install=yes&machine=x86 HTTP/1.1\r\n\
               Host: 127.0.0.1:8080\r\n\
               Content-Length: 20\r\n\
               \r\n\
               user=acorn&lang=rust";

    let request = match Request::parse(raw) {
        Ok(request) => request,
        Err(e) => {
            info!(cause = %e, "parse failed");
            return;
        }
    };

    info!(method = %request.method(), path = request.uri().path(), "parsed request");
    info!(install = ?request.query_value("install"), machine = ?request.query_value("machine"), "query values");
    info!(user = ?request.post_value("user"), lang = ?request.post_value("lang"), "form values");

    let mut response = Response::new(StatusCode::OK, request.version());
    response.message_mut().add_header("Content-Type".into(), "text/plain".into());
    response.message_mut().add_body(format!("hello {}\r\n", request.post_value("user").unwrap_or("anonymous")));

    println!("{}", response.to_text());
}
