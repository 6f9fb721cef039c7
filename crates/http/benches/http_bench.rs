use std::hint::black_box;

use bytes::{Bytes, BytesMut};
use criterion::{criterion_group, criterion_main, Criterion};
use zc_http::h2::FrameHeader;
use zc_http::protocol::{Request, Response};

fn bench_parse_request(c: &mut Criterion) {
    let raw: &'static [u8] = b"GET /q?install=yes&machine=x86 HTTP/1.1\r\n\
        Host: 127.0.0.1:8080\r\n\
        Connection: keep-alive\r\n\
        Accept: */*\r\n\
        Accept-Encoding: gzip, deflate\r\n\
        User-Agent: bench/1.0\r\n\
        \r\n";
    let buf = Bytes::from_static(raw);

    c.bench_function("parse_simple_request", |b| {
        b.iter(|| {
            black_box(Request::parse(buf.clone()).unwrap());
        });
    });
}

fn bench_parse_chunked_response(c: &mut Criterion) {
    let raw: &'static [u8] = b"HTTP/1.1 200 OK\r\n\
        Content-Type: text/plain\r\n\
        Transfer-Encoding: chunked\r\n\
        \r\n\
        6\r\nhello \r\n6\r\nworld!\r\n0\r\n\r\n";
    let buf = Bytes::from_static(raw);

    c.bench_function("parse_chunked_response", |b| {
        b.iter(|| {
            black_box(Response::parse(buf.clone()).unwrap());
        });
    });
}

fn bench_encode_request(c: &mut Criterion) {
    let buf = Bytes::from_static(b"PUT /items/7 HTTP/1.1\r\nHost: localhost\r\nContent-Length: 8\r\n\r\n{\"id\":7}");
    let request = Request::parse(buf).unwrap();

    c.bench_function("encode_simple_request", |b| {
        b.iter(|| {
            let mut dst = BytesMut::with_capacity(256);
            request.encode_to(&mut dst);
            black_box(dst);
        });
    });
}

fn bench_decode_frame_header(c: &mut Criterion) {
    let wire = [0u8, 0, 5, 0x1, 0x4, 0, 0, 0, 7];

    c.bench_function("decode_frame_header", |b| {
        b.iter(|| {
            black_box(FrameHeader::decode(&wire).unwrap());
        });
    });
}

criterion_group!(
    benches,
    bench_parse_request,
    bench_parse_chunked_response,
    bench_encode_request,
    bench_decode_frame_header
);
criterion_main!(benches);
