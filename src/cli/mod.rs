//! CLI module for archdoc

mod args;

pub use args::{Args, Command};

use crate::config::Config;
use crate::error::Result;
use crate::export::{ArchExporter, DocPublisher};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(config: Option<&Path>, output: Option<PathBuf>, pretty: bool) -> Result<Config> {
    let mut cfg = match config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new("archdoc.toml")),
    };
    cfg.merge_cli(output, pretty);
    cfg.validate()?;
    Ok(cfg)
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Export {
            path,
            output,
            config,
            pretty,
            verbose,
        } => {
            let cfg = load_config(config.as_deref(), output, pretty)?;

            if !path.exists() {
                return Err(crate::error::Error::PathNotFound(path));
            }

            println!("Scanning source directory: {}", path.display());

            let exporter = ArchExporter::new(cfg).with_verbose(verbose);
            let report = exporter.export_to_file(&path)?;

            if !report.skipped.is_empty() {
                println!("\nSkipped files ({}):", report.skipped.len());
                for (file, reason) in report.skipped.iter().take(5) {
                    println!("  {}: {}", file.display(), reason);
                }
                if report.skipped.len() > 5 {
                    println!("  ... and {} more", report.skipped.len() - 5);
                }
            }

            println!("\n{}", report.summary());
            println!("Contexts: {}", report.contexts);
            println!("Modules:  {}", report.modules);

            Ok(())
        }

        Command::Serve {
            path,
            output,
            config,
            port,
        } => {
            let cfg = load_config(config.as_deref(), output, false)?;

            if !path.exists() {
                return Err(crate::error::Error::PathNotFound(path));
            }

            let exporter = ArchExporter::new(cfg);
            let publisher = Arc::new(DocPublisher::new(exporter, path));

            if !publisher.output_path().exists() {
                println!("No document found, generating...");
                match publisher.publish() {
                    Ok(report) => println!("{}", report.summary()),
                    Err(e) => eprintln!("Initial export failed: {}", e),
                }
            }

            println!(
                "Serving {} on http://localhost:{}",
                publisher.output_path().display(),
                port
            );
            println!("  GET  /arch.json  current document");
            println!("  POST /update     regenerate the document");
            println!("Press Ctrl+C to stop");

            serve(publisher, port)
        }

        Command::Version => {
            println!("archdoc {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Minimal HTTP server around the published document
fn serve(publisher: Arc<DocPublisher>, port: u16) -> Result<()> {
    let listener = TcpListener::bind(format!("127.0.0.1:{}", port)).map_err(|e| {
        crate::error::Error::Other(format!("Failed to bind to port {}: {}", port, e))
    })?;

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let publisher = Arc::clone(&publisher);
                std::thread::spawn(move || {
                    if let Err(e) = handle_request(stream, &publisher) {
                        eprintln!("Request error: {}", e);
                    }
                });
            }
            Err(e) => eprintln!("Connection error: {}", e),
        }
    }

    Ok(())
}

/// Headers that keep the document out of every cache
const NO_CACHE_HEADERS: &str =
    "Cache-Control: no-cache, no-store, must-revalidate\r\nPragma: no-cache\r\nExpires: 0\r\n";

/// Handle a single HTTP request
fn handle_request(mut stream: TcpStream, publisher: &DocPublisher) -> Result<()> {
    let mut buffer = [0; 4096];
    let n = stream.read(&mut buffer)?;
    let request = String::from_utf8_lossy(&buffer[..n]);

    let request_line = request.lines().next().unwrap_or("");
    let parts: Vec<&str> = request_line.split_whitespace().collect();

    if parts.len() < 2 {
        send_response(&mut stream, 400, "Bad Request", "text/plain", "", b"Bad Request")?;
        return Ok(());
    }

    let method = parts[0];
    let path = parts[1].split('?').next().unwrap_or(parts[1]);

    match (method, path) {
        ("GET", "/arch.json") => match std::fs::read(publisher.output_path()) {
            Ok(content) => {
                send_response(
                    &mut stream,
                    200,
                    "OK",
                    "application/json; charset=utf-8",
                    NO_CACHE_HEADERS,
                    &content,
                )?;
                println!("200 {} {}", method, path);
            }
            Err(_) => {
                send_response(&mut stream, 404, "Not Found", "text/plain", "", b"Not Found")?;
                println!("404 {} {}", method, path);
            }
        },

        ("POST", "/update") => {
            let body = match publisher.publish() {
                Ok(_) => r#"{"success":true}"#,
                Err(e) => {
                    eprintln!("Regeneration failed: {}", e);
                    r#"{"success":false}"#
                }
            };
            send_response(
                &mut stream,
                200,
                "OK",
                "application/json; charset=utf-8",
                NO_CACHE_HEADERS,
                body.as_bytes(),
            )?;
            println!("200 {} {}", method, path);
        }

        ("GET", "/") => {
            let body = b"archdoc\n\nGET  /arch.json\nPOST /update\n";
            send_response(&mut stream, 200, "OK", "text/plain; charset=utf-8", "", body)?;
            println!("200 {} {}", method, path);
        }

        _ => {
            send_response(&mut stream, 404, "Not Found", "text/plain", "", b"Not Found")?;
            println!("404 {} {}", method, path);
        }
    }

    Ok(())
}

/// Send an HTTP response
fn send_response(
    stream: &mut TcpStream,
    status_code: u16,
    status_text: &str,
    content_type: &str,
    extra_headers: &str,
    body: &[u8],
) -> Result<()> {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        status_code,
        status_text,
        content_type,
        body.len(),
        extra_headers
    );

    stream.write_all(response.as_bytes())?;
    stream.write_all(body)?;
    stream.flush()?;

    Ok(())
}
