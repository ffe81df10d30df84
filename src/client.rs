use crate::error::Result;
use crate::error::ShortyError;
use crate::protocol::Request;
use crate::protocol::Response;
use rmp_serde::decode::Deserializer;
use rmp_serde::decode::ReadReader;
use rmp_serde::encode::Serializer;
use serde::Deserialize;
use serde::Serialize;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::net::SocketAddr;
use std::net::TcpStream;

pub struct ShortyClient {
    reader: Deserializer<ReadReader<BufReader<TcpStream>>>,
    writer: Serializer<BufWriter<TcpStream>>,
}

impl ShortyClient {
    pub fn connect(addr: &SocketAddr) -> Result<Self> {
        let reader_stream = TcpStream::connect(addr)?;
        let writer_stream = reader_stream.try_clone()?;

        let reader = Deserializer::new(BufReader::new(reader_stream));
        let writer = Serializer::new(BufWriter::new(writer_stream));
        Ok(Self { reader, writer })
    }

    pub fn shorten(&mut self, value: String) -> Result<String> {
        match self.send(Request::Shorten(value))? {
            Response::Shortened(key) => Ok(key),
            Response::Err(msg) => Err(ShortyError::StringError(msg)),
            _ => Err(ShortyError::UnexpectedResponse),
        }
    }

    pub fn resolve(&mut self, key: String) -> Result<String> {
        match self.send(Request::Resolve(key))? {
            Response::Resolved(value) => Ok(value),
            Response::NotFound(key) => Err(ShortyError::NotFound(key)),
            Response::Err(msg) => Err(ShortyError::StringError(msg)),
            _ => Err(ShortyError::UnexpectedResponse),
        }
    }

    fn send(&mut self, request: Request) -> Result<Response> {
        request.serialize(&mut self.writer)?;
        self.writer.get_mut().flush()?;
        Ok(Response::deserialize(&mut self.reader)?)
    }
}
