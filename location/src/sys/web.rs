//! Browser location implementation using `navigator.geolocation`.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Position as GeolocationPosition, PositionError as GeolocationPositionError};

use crate::{Location, LocationError};

type Reply = Rc<RefCell<Option<oneshot::Sender<Result<Location, LocationError>>>>>;

/// Equivalent of `"geolocation" in navigator`.
pub(crate) fn is_supported() -> bool {
    web_sys::window().is_some_and(|window| {
        js_sys::Reflect::has(&window.navigator(), &JsValue::from_str("geolocation"))
            .unwrap_or(false)
    })
}

/// Issue a single `getCurrentPosition` call with no options and await its outcome.
pub(crate) async fn get_location() -> Result<Location, LocationError> {
    let window = web_sys::window().ok_or(LocationError::NotSupported)?;
    let geolocation = window
        .navigator()
        .geolocation()
        .map_err(|_| LocationError::NotSupported)?;

    let (tx, rx) = oneshot::channel();
    let reply: Reply = Rc::new(RefCell::new(Some(tx)));

    let on_success = {
        let reply = Rc::clone(&reply);
        Closure::<dyn FnMut(GeolocationPosition)>::new(move |position: GeolocationPosition| {
            settle(&reply, Ok(location_from(&position)));
        })
    };

    let on_error = {
        let reply = Rc::clone(&reply);
        Closure::<dyn FnMut(GeolocationPositionError)>::new(
            move |error: GeolocationPositionError| {
                debug!(
                    "getCurrentPosition failed with code {}: {}",
                    error.code(),
                    error.message()
                );
                settle(
                    &reply,
                    Err(LocationError::from_code(error.code(), error.message())),
                );
            },
        )
    };

    geolocation
        .get_current_position_with_error_callback(
            on_success.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
        )
        .map_err(|e| LocationError::Unknown(describe(&e)))?;

    let outcome = rx
        .await
        .map_err(|_| LocationError::Unknown("geolocation callback dropped".into()));

    // Only one of the two callbacks ever fires; both must live until it has.
    drop(on_success);
    drop(on_error);

    outcome?
}

fn settle(reply: &Reply, result: Result<Location, LocationError>) {
    if let Some(tx) = reply.borrow_mut().take() {
        let _ = tx.send(result);
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn location_from(position: &GeolocationPosition) -> Location {
    let coords = position.coords();
    Location {
        latitude: coords.latitude(),
        longitude: coords.longitude(),
        altitude: coords.altitude(),
        horizontal_accuracy: Some(coords.accuracy()),
        vertical_accuracy: coords.altitude_accuracy(),
        timestamp: position.timestamp().max(0.0) as u64,
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
