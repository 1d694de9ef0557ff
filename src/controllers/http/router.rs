use log::{error, warn};
use tiny_http::Method;

use crate::controllers::http::query::parse_render_query;
use crate::controllers::ports::image_presenter::ImagePresenterPort;
use crate::core::actions::render_fractal::render_fractal;

pub const ROOT_PATH: &str = "/";
pub const IMAGE_PATH: &str = "/img.png";

/// What the server should send back for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Image {
        content_type: &'static str,
        body: Vec<u8>,
    },
    Redirect {
        location: &'static str,
    },
    BadRequest(String),
    NotFound,
    MethodNotAllowed,
    InternalError(String),
}

impl Reply {
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Image { .. } => 200,
            Self::Redirect { .. } => 301,
            Self::BadRequest(_) => 400,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::InternalError(_) => 500,
        }
    }
}

pub struct Router<P: ImagePresenterPort> {
    presenter: P,
}

impl<P: ImagePresenterPort> Router<P> {
    pub fn new(presenter: P) -> Self {
        Self { presenter }
    }

    pub fn route(&self, method: &Method, url: &str) -> Reply {
        if !matches!(method, Method::Get | Method::Head) {
            return Reply::MethodNotAllowed;
        }

        let (path, query) = url.split_once('?').unwrap_or((url, ""));

        match path {
            ROOT_PATH => Reply::Redirect {
                location: IMAGE_PATH,
            },
            IMAGE_PATH => self.image(query),
            _ => Reply::NotFound,
        }
    }

    fn image(&self, query: &str) -> Reply {
        let params = match parse_render_query(query) {
            Ok(params) => params,
            Err(err) => {
                warn!("rejected query '{}': {}", query, err);
                return Reply::BadRequest(err.to_string());
            }
        };

        let buffer = match render_fractal(&params) {
            Ok(buffer) => buffer,
            Err(err) => {
                error!("render failed: {}", err);
                return Reply::InternalError(err.to_string());
            }
        };

        match self.presenter.present(buffer) {
            Ok(body) => Reply::Image {
                content_type: self.presenter.content_type(),
                body,
            },
            Err(err) => {
                error!("encoding failed: {}", err);
                Reply::InternalError(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::pixel_buffer::PixelBuffer;
    use crate::presenters::file::png::PngPresenter;
    use std::error::Error;
    use std::fmt;

    #[derive(Debug)]
    struct StubPresenterError {}

    impl fmt::Display for StubPresenterError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "StubPresenterError")
        }
    }

    impl Error for StubPresenterError {}

    struct StubSizePresenter {}

    impl ImagePresenterPort for StubSizePresenter {
        type Failure = StubPresenterError;

        fn present(&self, buffer: PixelBuffer) -> Result<Vec<u8>, Self::Failure> {
            let rect = buffer.pixel_rect();
            Ok(format!("{}x{}", rect.width(), rect.height()).into_bytes())
        }

        fn content_type(&self) -> &'static str {
            "text/plain"
        }
    }

    struct StubFailingPresenter {}

    impl ImagePresenterPort for StubFailingPresenter {
        type Failure = StubPresenterError;

        fn present(&self, _: PixelBuffer) -> Result<Vec<u8>, Self::Failure> {
            Err(StubPresenterError {})
        }

        fn content_type(&self) -> &'static str {
            "text/plain"
        }
    }

    #[test]
    fn root_redirects_to_image() {
        let router = Router::new(StubSizePresenter {});
        let reply = router.route(&Method::Get, "/");

        assert_eq!(reply, Reply::Redirect { location: "/img.png" });
        assert_eq!(reply.status_code(), 301);
    }

    #[test]
    fn image_path_renders_with_query_params() {
        let router = Router::new(StubSizePresenter {});
        let reply = router.route(&Method::Get, "/img.png?width=12&height=7&iterations=20");

        assert_eq!(
            reply,
            Reply::Image {
                content_type: "text/plain",
                body: b"12x7".to_vec()
            }
        );
        assert_eq!(reply.status_code(), 200);
    }

    #[test]
    fn image_path_serves_png() {
        let router = Router::new(PngPresenter::new());
        let reply = router.route(&Method::Get, "/img.png?width=20&height=20&mode=julia");

        match reply {
            Reply::Image { content_type, body } => {
                assert_eq!(content_type, "image/png");
                let decoded = image::load_from_memory(&body).unwrap();
                assert_eq!((decoded.width(), decoded.height()), (20, 20));
            }
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn bad_query_is_a_client_error() {
        let router = Router::new(StubSizePresenter {});
        let reply = router.route(&Method::Get, "/img.png?zoom=-3");

        assert!(matches!(reply, Reply::BadRequest(_)));
        assert_eq!(reply.status_code(), 400);
    }

    #[test]
    fn presenter_failure_is_a_server_error() {
        let router = Router::new(StubFailingPresenter {});
        let reply = router.route(&Method::Get, "/img.png?width=4&height=4");

        assert_eq!(reply, Reply::InternalError("StubPresenterError".to_string()));
        assert_eq!(reply.status_code(), 500);
    }

    #[test]
    fn unknown_path_is_not_found() {
        let router = Router::new(StubSizePresenter {});

        assert_eq!(router.route(&Method::Get, "/favicon.ico"), Reply::NotFound);
    }

    #[test]
    fn only_get_and_head_are_allowed() {
        let router = Router::new(StubSizePresenter {});

        assert_eq!(router.route(&Method::Post, "/img.png"), Reply::MethodNotAllowed);
        assert_eq!(
            router.route(&Method::Head, "/"),
            Reply::Redirect { location: "/img.png" }
        );
    }
}
