use std::error::Error;
use std::fmt;
use std::io::Cursor;
use std::sync::Arc;
use std::thread;

use log::{error, info};
use tiny_http::{Header, Request, Response, Server, StatusCode};

use crate::controllers::http::router::{Reply, Router};
use crate::controllers::ports::image_presenter::ImagePresenterPort;

pub const DEFAULT_ADDRESS: &str = "localhost:8080";
pub const DEFAULT_WORKERS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub address: String,
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            workers: DEFAULT_WORKERS,
        }
    }
}

#[derive(Debug)]
pub enum HttpError {
    Bind {
        address: String,
        source: Box<dyn Error + Send + Sync>,
    },
    InvalidHeader {
        name: &'static str,
    },
    WorkerPanicked,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bind { address, source } => {
                write!(f, "could not listen on {}: {}", address, source)
            }
            Self::InvalidHeader { name } => write!(f, "invalid value for header {}", name),
            Self::WorkerPanicked => write!(f, "request worker panicked"),
        }
    }
}

impl Error for HttpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Bind { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

fn header(name: &'static str, value: &str) -> Result<Header, HttpError> {
    Header::from_bytes(name, value).map_err(|()| HttpError::InvalidHeader { name })
}

pub fn into_response(reply: Reply) -> Result<Response<Cursor<Vec<u8>>>, HttpError> {
    let status = StatusCode(reply.status_code());

    let response = match reply {
        Reply::Image { content_type, body } => {
            Response::from_data(body).with_header(header("Content-Type", content_type)?)
        }
        Reply::Redirect { location } => {
            Response::from_data(Vec::new()).with_header(header("Location", location)?)
        }
        Reply::BadRequest(message) | Reply::InternalError(message) => {
            Response::from_string(message)
        }
        Reply::NotFound => Response::from_string("not found"),
        Reply::MethodNotAllowed => Response::from_string("method not allowed"),
    };

    Ok(response.with_status_code(status))
}

fn handle<P: ImagePresenterPort>(router: &Router<P>, request: Request) {
    let method = request.method().clone();
    let url = request.url().to_string();
    let reply = router.route(&method, &url);
    let status = reply.status_code();

    let result = into_response(reply).map(|response| request.respond(response));

    match result {
        Ok(Ok(())) => info!("{} {} -> {}", method, url, status),
        Ok(Err(err)) => error!("{} {}: could not send response: {}", method, url, err),
        Err(err) => error!("{} {}: {}", method, url, err),
    }
}

/// Listens on `config.address` and answers requests until the listener
/// fails. Renders run on the global rayon pool; `config.workers` threads
/// accept and answer requests.
pub fn serve<P>(config: &ServerConfig, router: Router<P>) -> Result<(), HttpError>
where
    P: ImagePresenterPort + Send + Sync + 'static,
{
    let server = Server::http(config.address.as_str()).map_err(|source| HttpError::Bind {
        address: config.address.clone(),
        source,
    })?;

    info!("Listening on http://{}", config.address);

    serve_on(server, config.workers, router)
}

/// Answers requests from an already bound `server` on `workers` threads.
pub fn serve_on<P>(server: Server, workers: usize, router: Router<P>) -> Result<(), HttpError>
where
    P: ImagePresenterPort + Send + Sync + 'static,
{
    let server = Arc::new(server);
    let router = Arc::new(router);

    let workers: Vec<_> = (0..workers.max(1))
        .map(|_| {
            let server = Arc::clone(&server);
            let router = Arc::clone(&router);

            thread::spawn(move || {
                loop {
                    match server.recv() {
                        Ok(request) => handle(&*router, request),
                        Err(err) => {
                            error!("stopped accepting requests: {}", err);
                            break;
                        }
                    }
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().map_err(|_| HttpError::WorkerPanicked)?;
    }

    Ok(())
}
