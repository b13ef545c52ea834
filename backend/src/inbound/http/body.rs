//! Request body helpers for endpoints accepting JSON or HTML forms.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{Either, FromRequest, HttpRequest, web};
use futures_util::future::{LocalBoxFuture, ready};
use serde::de::DeserializeOwned;

/// Body extracted from either `application/json` or
/// `application/x-www-form-urlencoded`.
pub type JsonOrForm<T> = Either<web::Json<T>, web::Form<T>>;

/// Unwrap whichever representation the client sent.
pub fn into_payload<T>(body: JsonOrForm<T>) -> T {
    match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    }
}

/// JSON or form body; a request with no body and no content type yields
/// `T::default()` so field validation reports what is missing.
///
/// ```
/// use exercise_tracker::inbound::http::body::RequestBody;
/// use exercise_tracker::inbound::http::users::CreateUserBody;
///
/// async fn handler(body: RequestBody<CreateUserBody>) -> String {
///     body.into_inner().username.unwrap_or_default()
/// }
/// ```
#[derive(Debug)]
pub struct RequestBody<T>(T);

impl<T> RequestBody<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

fn is_bodiless(req: &HttpRequest) -> bool {
    let headers = req.headers();
    if headers.contains_key(header::CONTENT_TYPE) {
        return false;
    }
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .is_none_or(|length| length.trim() == "0")
        && !headers.contains_key(header::TRANSFER_ENCODING)
}

impl<T> FromRequest for RequestBody<T>
where
    T: DeserializeOwned + Default + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if is_bodiless(req) {
            return Box::pin(ready(Ok(Self(T::default()))));
        }
        let body = JsonOrForm::<T>::from_request(req, payload);
        Box::pin(async move {
            body.await
                .map(|body| Self(into_payload(body)))
                .map_err(Into::into)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        #[serde(default)]
        name: Option<String>,
    }

    #[rstest]
    #[actix_web::test]
    async fn bodiless_request_yields_default() {
        let (req, mut payload) = TestRequest::post().to_http_parts();
        let body = RequestBody::<Sample>::from_request(&req, &mut payload)
            .await
            .expect("default body");
        assert_eq!(body.into_inner(), Sample::default());
    }

    #[rstest]
    #[actix_web::test]
    async fn form_body_is_decoded() {
        let (req, mut payload) = TestRequest::post()
            .set_form([("name", "ada")])
            .to_http_parts();
        let body = RequestBody::<Sample>::from_request(&req, &mut payload)
            .await
            .expect("form body");
        assert_eq!(body.into_inner().name.as_deref(), Some("ada"));
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_content_type_is_rejected() {
        let (req, mut payload) = TestRequest::post()
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .set_payload("name=ada")
            .to_http_parts();
        assert!(
            RequestBody::<Sample>::from_request(&req, &mut payload)
                .await
                .is_err()
        );
    }
}
