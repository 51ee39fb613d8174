//! Turning the athlete's profile picture into something the poster can embed.
//!
//! Remote images taint a canvas and are not resolved by the desktop
//! rasterizer, so the poster only ever sees `data:` URIs. Resolution tries the
//! image host directly, then the backend proxy, then gives up and the poster
//! draws the athlete's initial.

use api::{ApiError, FetchedImage, RoundupClient};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures::future::{FutureExt, LocalBoxFuture};

/// The two ways of getting image bytes, split out so tests do not need HTTP.
pub trait AvatarFetcher {
    fn fetch_direct<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<FetchedImage, ApiError>>;
    fn fetch_proxied<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<String, ApiError>>;
}

impl AvatarFetcher for RoundupClient {
    fn fetch_direct<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<FetchedImage, ApiError>> {
        self.fetch_image(url).boxed_local()
    }

    fn fetch_proxied<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<String, ApiError>> {
        self.fetch_proxied_image(url).boxed_local()
    }
}

/// Data URI for `image_url`, or `None` when neither route produced one.
pub async fn prepare_poster_image(
    fetcher: &dyn AvatarFetcher,
    image_url: Option<&str>,
) -> Option<String> {
    let url = image_url.map(str::trim).filter(|url| !url.is_empty())?;
    if url.starts_with("data:") {
        return Some(url.to_string());
    }

    match fetcher.fetch_direct(url).await {
        Ok(image) if !image.bytes.is_empty() => return Some(to_data_uri(&image)),
        Ok(_) => tracing::warn!(url, "direct avatar fetch returned no bytes"),
        Err(err) => tracing::warn!(url, %err, "direct avatar fetch failed; trying proxy"),
    }

    match fetcher.fetch_proxied(url).await {
        Ok(data_uri) => Some(data_uri),
        Err(err) => {
            tracing::warn!(url, %err, "avatar proxy failed; poster falls back to initial");
            None
        }
    }
}

pub fn to_data_uri(image: &FetchedImage) -> String {
    let mime = image
        .content_type
        .as_deref()
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .filter(|mime| mime.starts_with("image/"))
        .unwrap_or_else(|| sniff_mime(&image.bytes));
    format!("data:{mime};base64,{}", STANDARD.encode(&image.bytes))
}

fn sniff_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;

    struct FakeFetcher {
        direct: Result<FetchedImage, ApiError>,
        proxied: Result<String, ApiError>,
        direct_calls: Cell<u32>,
        proxy_calls: Cell<u32>,
    }

    impl FakeFetcher {
        fn new(direct: Result<FetchedImage, ApiError>, proxied: Result<String, ApiError>) -> Self {
            Self {
                direct,
                proxied,
                direct_calls: Cell::new(0),
                proxy_calls: Cell::new(0),
            }
        }
    }

    impl AvatarFetcher for FakeFetcher {
        fn fetch_direct<'a>(&'a self, _url: &'a str) -> LocalBoxFuture<'a, Result<FetchedImage, ApiError>> {
            self.direct_calls.set(self.direct_calls.get() + 1);
            let result = self.direct.clone();
            async move { result }.boxed_local()
        }

        fn fetch_proxied<'a>(&'a self, _url: &'a str) -> LocalBoxFuture<'a, Result<String, ApiError>> {
            self.proxy_calls.set(self.proxy_calls.get() + 1);
            let result = self.proxied.clone();
            async move { result }.boxed_local()
        }
    }

    fn png() -> FetchedImage {
        FetchedImage {
            content_type: Some("image/png".into()),
            bytes: vec![0x89, b'P', b'N', b'G', 1, 2, 3],
        }
    }

    #[test]
    fn data_uris_pass_through_untouched() {
        let fetcher = FakeFetcher::new(Err(ApiError::Network("down".into())), Err(ApiError::InvalidProxyPayload));
        let src = "data:image/png;base64,AAAA";
        assert_eq!(block_on(prepare_poster_image(&fetcher, Some(src))).as_deref(), Some(src));
        assert_eq!(fetcher.direct_calls.get(), 0);
    }

    #[test]
    fn direct_fetch_wins_when_it_works() {
        let fetcher = FakeFetcher::new(Ok(png()), Err(ApiError::InvalidProxyPayload));
        let uri = block_on(prepare_poster_image(&fetcher, Some("https://cdn.example/a.png"))).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(fetcher.proxy_calls.get(), 0);
    }

    #[test]
    fn proxy_is_the_second_attempt() {
        let fetcher = FakeFetcher::new(
            Err(ApiError::Network("blocked by CORS".into())),
            Ok("data:image/jpeg;base64,BBBB".into()),
        );
        let uri = block_on(prepare_poster_image(&fetcher, Some("https://cdn.example/a.jpg")));
        assert_eq!(uri.as_deref(), Some("data:image/jpeg;base64,BBBB"));
        assert_eq!(fetcher.direct_calls.get(), 1);
        assert_eq!(fetcher.proxy_calls.get(), 1);
    }

    #[test]
    fn both_routes_failing_yields_none() {
        let fetcher = FakeFetcher::new(Err(ApiError::Network("x".into())), Err(ApiError::InvalidProxyPayload));
        assert_eq!(block_on(prepare_poster_image(&fetcher, Some("https://cdn.example/a.jpg"))), None);
        assert_eq!(block_on(prepare_poster_image(&fetcher, None)), None);
        assert_eq!(block_on(prepare_poster_image(&fetcher, Some("   "))), None);
    }

    #[test]
    fn mime_type_is_sniffed_when_missing() {
        let image = FetchedImage {
            content_type: Some("application/octet-stream".into()),
            bytes: b"GIF89a".to_vec(),
        };
        assert!(to_data_uri(&image).starts_with("data:image/gif;base64,"));

        let unknown = FetchedImage {
            content_type: None,
            bytes: vec![0xff, 0xd8, 0xff],
        };
        assert_eq!(to_data_uri(&unknown), "data:image/jpeg;base64,/9j/");
    }
}
