//! Browser export: SVG blob → `<img>` → canvas pixels, Web Share or an
//! anchor download for delivery.

use futures::future::{FutureExt, LocalBoxFuture};
use js_sys::{Array, Function, Object, Reflect, Uint8Array};
use wasm_bindgen::{Clamped, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobPropertyBag, CanvasRenderingContext2d, Document, File, FilePropertyBag,
    HtmlAnchorElement, HtmlCanvasElement, HtmlImageElement, Url,
};

use super::{Delivery, ExportError, PosterFile, RasterImage, RasterTarget, Rasterizer, ShareTarget};

/// Object URL revoked when dropped, so every exit path releases it once.
struct ObjectUrl(String);

impl ObjectUrl {
    fn for_blob(blob: &Blob) -> Result<Self, ExportError> {
        Url::create_object_url_with_blob(blob)
            .map(Self)
            .map_err(|err| ExportError::Blob(js_error(&err)))
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        Url::revoke_object_url(&self.0).ok();
    }
}

pub struct WebRasterizer;

impl Rasterizer for WebRasterizer {
    fn rasterize<'a>(
        &'a self,
        svg: &'a str,
        target: &'a RasterTarget,
    ) -> LocalBoxFuture<'a, Result<RasterImage, ExportError>> {
        async move {
            let image = load_svg_image(svg).await?;
            draw_to_pixels(&image, target)
        }
        .boxed_local()
    }
}

async fn load_svg_image(svg: &str) -> Result<HtmlImageElement, ExportError> {
    let parts = Array::of1(&JsValue::from_str(svg));
    let options = BlobPropertyBag::new();
    options.set_type("image/svg+xml;charset=utf-8");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|err| ExportError::Blob(js_error(&err)))?;

    let url = ObjectUrl::for_blob(&blob)?;
    let image = HtmlImageElement::new().map_err(|err| ExportError::ImageLoad(js_error(&err)))?;
    image.set_src(url.as_str());
    let decoded = JsFuture::from(image.decode()).await;
    drop(url);

    decoded.map_err(|err| ExportError::ImageLoad(js_error(&err)))?;
    Ok(image)
}

fn draw_to_pixels(image: &HtmlImageElement, target: &RasterTarget) -> Result<RasterImage, ExportError> {
    let unavailable = |what: &str| ExportError::CanvasUnavailable(what.to_string());

    let canvas: HtmlCanvasElement = document()
        .map_err(|_| unavailable("document unavailable"))?
        .create_element("canvas")
        .map_err(|_| unavailable("unable to create canvas"))?
        .dyn_into()
        .map_err(|_| unavailable("canvas cast failed"))?;
    canvas.set_width(target.width);
    canvas.set_height(target.height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| unavailable("2d context unavailable"))?
        .ok_or_else(|| unavailable("2d context missing"))?
        .dyn_into()
        .map_err(|_| unavailable("context cast failed"))?;

    let (width, height) = (target.width as f64, target.height as f64);
    context.set_fill_style_str(&target.background_css());
    context.fill_rect(0.0, 0.0, width, height);

    let (x, y, dw, dh) = target.placement(target.source_width, target.source_height);
    context
        .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, dw, dh)
        .map_err(|err| ExportError::ImageLoad(js_error(&err)))?;

    let Clamped(rgba) = context
        .get_image_data(0.0, 0.0, width, height)
        .map_err(|err| ExportError::CanvasUnavailable(js_error(&err)))?
        .data();

    Ok(RasterImage {
        width: target.width,
        height: target.height,
        rgba,
    })
}

/// Web Share API when the browser accepts files, anchor download otherwise.
pub struct WebShareTarget;

impl ShareTarget for WebShareTarget {
    fn can_share_files(&self, file: &PosterFile) -> bool {
        let Some(navigator) = web_sys::window().map(|w| w.navigator()) else {
            return false;
        };
        if navigator_method(&navigator, "share").is_none() {
            return false;
        }
        let Some(can_share) = navigator_method(&navigator, "canShare") else {
            return false;
        };
        let Ok(file) = to_js_file(file) else {
            return false;
        };
        let Ok(data) = share_data(&file, None, None) else {
            return false;
        };
        can_share
            .call1(&navigator, &data)
            .map(|answer| answer.is_truthy())
            .unwrap_or(false)
    }

    fn share<'a>(
        &'a self,
        file: &'a PosterFile,
        title: &'a str,
        text: &'a str,
    ) -> LocalBoxFuture<'a, Result<(), ExportError>> {
        async move {
            let navigator = web_sys::window()
                .map(|w| w.navigator())
                .ok_or_else(|| ExportError::Share("navigator unavailable".into()))?;
            let share = navigator_method(&navigator, "share")
                .ok_or_else(|| ExportError::Share("navigator.share missing".into()))?;
            let file = to_js_file(file)?;
            let data = share_data(&file, Some(title), Some(text))?;
            let promise = share
                .call1(&navigator, &data)
                .map_err(|err| ExportError::Share(js_error(&err)))?;
            JsFuture::from(js_sys::Promise::from(promise))
                .await
                .map_err(|err| ExportError::Share(js_error(&err)))?;
            Ok(())
        }
        .boxed_local()
    }

    fn download<'a>(&'a self, file: &'a PosterFile) -> LocalBoxFuture<'a, Result<Delivery, ExportError>> {
        async move {
            let failed = |what: &str| ExportError::Download(what.to_string());

            let blob = bytes_blob(&file.bytes, file.mime)?;
            let url = ObjectUrl::for_blob(&blob)?;
            let document = document().map_err(|_| failed("document unavailable"))?;
            let anchor: HtmlAnchorElement = document
                .create_element("a")
                .map_err(|_| failed("unable to create anchor"))?
                .dyn_into()
                .map_err(|_| failed("anchor cast failed"))?;
            anchor.set_href(url.as_str());
            anchor.set_download(&file.name);
            anchor.style().set_property("display", "none").ok();

            document
                .body()
                .ok_or_else(|| failed("missing body"))?
                .append_child(&anchor)
                .map_err(|err| ExportError::Download(js_error(&err)))?;
            anchor.click();
            anchor.remove();
            drop(url);

            Ok(Delivery::Downloaded {
                filename: file.name.clone(),
            })
        }
        .boxed_local()
    }
}

fn document() -> Result<Document, ()> {
    web_sys::window().and_then(|w| w.document()).ok_or(())
}

fn navigator_method(navigator: &web_sys::Navigator, name: &str) -> Option<Function> {
    Reflect::get(navigator, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

fn bytes_blob(bytes: &[u8], mime: &str) -> Result<Blob, ExportError> {
    let array = Uint8Array::from(bytes);
    let parts = Array::of1(&array);
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|err| ExportError::Blob(js_error(&err)))
}

fn to_js_file(file: &PosterFile) -> Result<File, ExportError> {
    let array = Uint8Array::from(file.bytes.as_slice());
    let parts = Array::of1(&array);
    let options = FilePropertyBag::new();
    options.set_type(file.mime);
    File::new_with_u8_array_sequence_and_options(&parts, &file.name, &options)
        .map_err(|err| ExportError::Blob(js_error(&err)))
}

fn share_data(file: &File, title: Option<&str>, text: Option<&str>) -> Result<Object, ExportError> {
    let data = Object::new();
    let set = |key: &str, value: &JsValue| {
        Reflect::set(&data, &JsValue::from_str(key), value)
            .map(|_| ())
            .map_err(|err| ExportError::Share(js_error(&err)))
    };
    set("files", &Array::of1(file))?;
    if let Some(title) = title {
        set("title", &JsValue::from_str(title))?;
    }
    if let Some(text) = text.filter(|text| !text.is_empty()) {
        set("text", &JsValue::from_str(text))?;
    }
    Ok(data)
}

fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
