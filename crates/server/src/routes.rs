#![forbid(unsafe_code)]

use crate::http::{HttpRequest, Response, decode_path_segment, normalize_path};
use crate::server::AppState;
use crate::{api, assets, pages};

const OWNER_PREFIX: &str = "/kid/";

pub(crate) fn route(state: &AppState, request: &HttpRequest) -> Response {
    let method = request.method.as_str();
    let Some(path) = normalize_path(&request.target) else {
        return Response::not_found();
    };

    if path == "/api/update_status" {
        return match method {
            "POST" => api::update_status(state, &request.body),
            _ => api::method_not_allowed(),
        };
    }

    if method != "GET" && method != "HEAD" {
        return Response::method_not_allowed();
    }

    match path {
        "/" => pages::board(state, None),
        "/static/app.css" => Response::asset("text/css; charset=utf-8", assets::APP_CSS),
        "/static/app.js" => {
            Response::asset("application/javascript; charset=utf-8", assets::APP_JS)
        }
        _ => match path.strip_prefix(OWNER_PREFIX).map(decode_path_segment) {
            Some(Some(owner)) if !owner.is_empty() => pages::board(state, Some(owner.as_str())),
            _ => Response::not_found(),
        },
    }
}
