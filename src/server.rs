use crate::engines::ShortenEngine;
use crate::error::Result;
use crate::error::ShortyError;
use crate::protocol::Request;
use crate::protocol::Response;
use crate::thread_pool::ThreadPool;
use rmp_serde::decode;
use rmp_serde::Deserializer;
use rmp_serde::Serializer;
use serde::Deserialize;
use serde::Serialize;
use slog::debug;
use slog::error;
use slog::o;
use slog::Logger;
use std::io;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::net::SocketAddr;
use std::net::TcpListener;
use std::net::TcpStream;

pub struct ShortyServer<E: ShortenEngine, P: ThreadPool> {
    engine: E,
    pool: P,
    log: Logger,
}

impl<E: ShortenEngine, P: ThreadPool> ShortyServer<E, P> {
    pub fn new(engine: E, pool: P, log: Logger) -> Self {
        Self { engine, pool, log }
    }

    /// Accept connections on `addr` until the listener fails. Each connection
    /// is handled on the pool.
    pub fn serve(&self, addr: &SocketAddr) -> Result<()> {
        let listener = TcpListener::bind(addr)?;
        self.serve_on(listener)
    }

    pub fn serve_on(&self, listener: TcpListener) -> Result<()> {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let peer = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_default();
                    let log = self.log.new(o!("peer" => peer));
                    debug!(log, "received connection");
                    let engine = self.engine.clone();
                    let job_log = log.clone();
                    let job = move || {
                        if let Err(err) = handle_connection(&engine, &job_log, stream) {
                            error!(job_log, "error serving connection: {}", err);
                        }
                    };
                    if let Err(err) = self.pool.spawn(job) {
                        error!(log, "could not schedule connection: {}", err);
                    }
                }
                Err(err) => {
                    error!(self.log, "error with incoming connection: {}", err);
                }
            }
        }
        Ok(())
    }
}

fn handle_connection<E: ShortenEngine>(engine: &E, log: &Logger, stream: TcpStream) -> Result<()> {
    let mut reader = Deserializer::new(BufReader::new(&stream));
    let mut writer = Serializer::new(BufWriter::new(&stream));
    loop {
        let request = match Request::deserialize(&mut reader) {
            Ok(request) => request,
            Err(decode::Error::InvalidMarkerRead(err))
                if err.kind() == io::ErrorKind::UnexpectedEof =>
            {
                debug!(log, "connection closed");
                return Ok(());
            }
            Err(err) => return Err(ShortyError::Decode(err)),
        };
        let response = handle_request(engine, log, request);
        response.serialize(&mut writer)?;
        writer.get_mut().flush()?;
    }
}

fn handle_request<E: ShortenEngine>(engine: &E, log: &Logger, request: Request) -> Response {
    match request {
        Request::Shorten(value) => match engine.shorten(value.clone()) {
            Ok(key) => {
                debug!(log, "shorten({}) = {}", value, key);
                Response::Shortened(key)
            }
            Err(err) => {
                error!(log, "shorten({}) failed: {}", value, err);
                Response::Err(err.to_string())
            }
        },
        Request::Resolve(key) => match engine.resolve(key.clone()) {
            Ok(value) => {
                debug!(log, "resolve({}) = {}", key, value);
                Response::Resolved(value)
            }
            Err(ShortyError::NotFound(key)) => {
                debug!(log, "resolve({}): not found", key);
                Response::NotFound(key)
            }
            Err(err) => {
                error!(log, "resolve({}) failed: {}", key, err);
                Response::Err(err.to_string())
            }
        },
    }
}
