// cartograph/gpu/src/tests.rs

use crate::{ContextState, Device, HostContext, ImageTexture, Texture, TextureError};
use crate::{TextureFilter, TextureFormat, TextureHandle, TextureOptions, TextureParameter};
use crate::{TextureTarget, TextureWrap};
use cartograph_color::{power_of_two, ChannelOrder, Pixel, PixelBuffer, PixelFormat, RowOrder};
use log::Level;
use pathfinder_geometry::vector::Vector2I;
use quickcheck::{self, TestResult};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, PartialEq, Debug)]
enum Call {
    GenTexture(TextureHandle),
    BindTexture(TextureTarget, TextureHandle),
    Upload(TextureTarget, TextureFormat, i32, i32, Vec<u8>),
    Parameter(TextureTarget, TextureParameter),
    GenerateMipmap(TextureTarget),
    DeleteTexture(TextureHandle),
}

#[derive(Default)]
struct RecordingDevice {
    next_texture: Cell<u32>,
    calls: RefCell<Vec<Call>>,
}

impl RecordingDevice {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn uploaded_bytes(&self) -> Vec<u8> {
        self.calls.borrow().iter().filter_map(|call| {
            match *call {
                Call::Upload(_, _, _, _, ref data) => Some(data.clone()),
                _ => None,
            }
        }).next().unwrap_or_default()
    }
}

impl Device for RecordingDevice {
    fn gen_texture(&self) -> TextureHandle {
        self.next_texture.set(self.next_texture.get() + 1);
        let texture = TextureHandle(self.next_texture.get());
        self.calls.borrow_mut().push(Call::GenTexture(texture));
        texture
    }

    fn bind_texture(&self, target: TextureTarget, texture: TextureHandle) {
        self.calls.borrow_mut().push(Call::BindTexture(target, texture));
    }

    fn upload_to_texture(&self,
                         target: TextureTarget,
                         format: TextureFormat,
                         size: Vector2I,
                         data: &[u8]) {
        self.calls.borrow_mut().push(Call::Upload(target, format, size.x(), size.y(), data.to_vec()));
    }

    fn set_texture_parameter(&self, target: TextureTarget, parameter: TextureParameter) {
        self.calls.borrow_mut().push(Call::Parameter(target, parameter));
    }

    fn generate_mipmap(&self, target: TextureTarget) {
        self.calls.borrow_mut().push(Call::GenerateMipmap(target));
    }

    fn delete_texture(&self, texture: TextureHandle) {
        self.calls.borrow_mut().push(Call::DeleteTexture(texture));
    }
}

fn ready_texture() -> ImageTexture {
    ImageTexture::new(Rc::new(ContextState::initialized_now()))
}

fn solid_image(width: i32, height: i32, pixel: Pixel) -> PixelBuffer {
    PixelBuffer::filled(Vector2I::new(width, height), PixelFormat::NATIVE, pixel)
}

#[test]
fn test_new_texture_has_no_image() {
    let texture = ready_texture();
    assert!(!texture.image_ready());
    assert_eq!(texture.texture_dims().x(), 1.0);
    assert_eq!(texture.texture_dims().y(), 1.0);
    assert_eq!(texture.image_dims().x(), 0.0);

    let device = RecordingDevice::default();
    assert_eq!(texture.bind_texture(&device), TextureHandle::NONE);
    assert!(device.calls().is_empty());
}

#[test]
fn test_set_image_pads_100x60_to_128x64() {
    let mut texture = ready_texture();
    texture.set_image(&solid_image(100, 60, Pixel::white()));

    assert!(texture.image_ready());
    assert_eq!(texture.image_dims().x(), 128.0);
    assert_eq!(texture.image_dims().y(), 64.0);
    assert_eq!(texture.texture_dims().x(), 100.0 / 128.0);
    assert_eq!(texture.texture_dims().y(), 60.0 / 64.0);
    assert_eq!(texture.image().bytes().len(), 128 * 64 * 4);
}

#[test]
fn test_set_image_dims_are_powers_of_two() {
    fn prop(width: u8, height: u8) -> TestResult {
        if width == 0 || height == 0 {
            return TestResult::discard();
        }
        let (width, height) = (width as i32, height as i32);
        let mut texture = ready_texture();
        texture.set_image(&solid_image(width, height, Pixel::white()));

        let (wpo2, hpo2) = (power_of_two(width), power_of_two(height));
        let dims = texture.image_dims();
        let fractions = texture.texture_dims();
        TestResult::from_bool(dims.x() == wpo2 as f32 &&
                              dims.y() == hpo2 as f32 &&
                              fractions.x() == width as f32 / wpo2 as f32 &&
                              fractions.y() == height as f32 / hpo2 as f32)
    }
    quickcheck::quickcheck(prop as fn(u8, u8) -> TestResult);
}

#[test]
fn test_null_image_clears_texture() {
    let mut texture = ready_texture();
    texture.set_image(&solid_image(3, 3, Pixel::white()));
    assert!(texture.image_ready());

    texture.set_image(&solid_image(0, 5, Pixel::white()));
    assert!(!texture.image_ready());
    assert!(texture.image().is_null());

    texture.set_image(&PixelBuffer::new(Vector2I::new(4, -1), PixelFormat::NATIVE));
    assert!(!texture.image_ready());

    let device = RecordingDevice::default();
    assert_eq!(texture.bind_texture(&device), TextureHandle::NONE);
    assert!(device.calls().is_empty());
}

#[test]
fn test_set_image_notifies_every_time() {
    let count = Rc::new(Cell::new(0));
    let mut texture = ready_texture();
    {
        let count = count.clone();
        texture.on_image_changed(move || count.set(count.get() + 1));
    }

    texture.set_image(&solid_image(2, 2, Pixel::white()));
    texture.set_image(&PixelBuffer::null());
    texture.set_image(&solid_image(5, 1, Pixel::white()));
    assert_eq!(count.get(), 3);
}

#[test]
fn test_set_image_swaps_red_and_blue_bytes() {
    let mut texture = ready_texture();
    let source = solid_image(3, 3, Pixel::new(10, 20, 30, 40));
    // Native layout stores blue first.
    assert_eq!(&source.bytes()[0..4], &[30, 20, 10, 40]);

    texture.set_image(&source);
    let image = texture.image();
    assert_eq!(image.format(), PixelFormat::new(ChannelOrder::Rgba, RowOrder::BottomUp));
    assert_eq!(&image.scanline(0)[0..4], &[10, 20, 30, 40]);
    assert_eq!(&image.scanline(2)[8..12], &[10, 20, 30, 40]);
}

#[test]
fn test_set_image_flips_rows_and_zeroes_padding() {
    let mut source = solid_image(3, 3, Pixel::white());
    source.set_pixel(0, 0, Pixel::new(255, 0, 0, 255));
    source.set_pixel(2, 2, Pixel::new(0, 0, 255, 255));

    let mut texture = ready_texture();
    texture.set_image(&source);
    let image = texture.image();
    assert_eq!(image.size(), Vector2I::new(4, 4));

    // Memory row 0 holds the source's bottom row; row 2 holds its top row.
    assert_eq!(&image.scanline(0)[8..12], &[0, 0, 255, 255]);
    assert_eq!(&image.scanline(2)[0..4], &[255, 0, 0, 255]);
    // Padding column and row.
    assert_eq!(&image.scanline(1)[12..16], &[0; 4]);
    assert!(image.scanline(3).iter().all(|&byte| byte == 0));
}

#[test]
fn test_bind_texture_uploads_with_configured_filters() {
    let options = TextureOptions {
        mag_filter: TextureFilter::Nearest,
        min_filter: TextureFilter::Linear,
    };
    let mut texture = ImageTexture::with_options(Rc::new(ContextState::initialized_now()),
                                                 options);
    texture.set_image(&solid_image(3, 2, Pixel::new(1, 2, 3, 4)));

    let device = RecordingDevice::default();
    let handle = texture.bind_texture(&device);
    assert_eq!(handle, TextureHandle(1));

    let target = TextureTarget::Texture2D;
    let calls = device.calls();
    assert_eq!(calls.len(), 7);
    assert_eq!(calls[0], Call::GenTexture(handle));
    assert_eq!(calls[1], Call::BindTexture(target, handle));
    match calls[2] {
        Call::Upload(upload_target, format, width, height, ref data) => {
            assert_eq!(upload_target, target);
            assert_eq!(format, TextureFormat::RGBA8);
            assert_eq!((width, height), (4, 2));
            assert_eq!(&data[0..4], &[1, 2, 3, 4]);
            assert_eq!(&data[12..16], &[0, 0, 0, 0]);
        }
        ref other => panic!("expected an upload, got {:?}", other),
    }
    assert_eq!(calls[3], Call::Parameter(target, TextureParameter::MagFilter(TextureFilter::Nearest)));
    assert_eq!(calls[4], Call::Parameter(target, TextureParameter::MinFilter(TextureFilter::Linear)));
    assert_eq!(calls[5], Call::Parameter(target, TextureParameter::WrapS(TextureWrap::ClampToEdge)));
    assert_eq!(calls[6], Call::Parameter(target, TextureParameter::WrapT(TextureWrap::ClampToEdge)));
}

#[test]
fn test_mipmaps_only_for_pure_mipmap_filters() {
    let filters = [
        (TextureFilter::Nearest, false),
        (TextureFilter::Linear, false),
        (TextureFilter::NearestMipmapNearest, true),
        (TextureFilter::LinearMipmapNearest, false),
        (TextureFilter::NearestMipmapLinear, false),
        (TextureFilter::LinearMipmapLinear, true),
    ];
    for &(filter, mipmapped) in &filters {
        let mut texture = ready_texture();
        texture.set_min_filter(filter);
        assert_eq!(texture.min_filter(), filter);
        texture.set_image(&solid_image(5, 5, Pixel::white()));

        let device = RecordingDevice::default();
        assert!(!texture.bind_texture(&device).is_none());
        let generated = device.calls().contains(&Call::GenerateMipmap(TextureTarget::Texture2D));
        assert_eq!(generated, mipmapped, "{:?}", filter);
    }
}

#[test]
fn test_each_bind_creates_a_new_texture() {
    let mut texture = ready_texture();
    texture.set_image(&solid_image(1, 1, Pixel::white()));

    let device = RecordingDevice::default();
    let first = texture.bind_texture(&device);
    let second = texture.bind_texture(&device);
    assert_ne!(first, second);

    texture.delete_texture(&device, first);
    texture.delete_texture(&device, TextureHandle::NONE);
    let deletes: Vec<_> = device.calls().into_iter().filter(|call| {
        match *call { Call::DeleteTexture(_) => true, _ => false }
    }).collect();
    assert_eq!(deletes, vec![Call::DeleteTexture(first)]);
}

#[test]
fn test_uninitialized_context_refuses_upload() {
    testing_logger::setup();

    let context = Rc::new(ContextState::new());
    let mut texture = ImageTexture::new(context.clone());
    texture.set_image(&solid_image(4, 4, Pixel::white()));
    assert!(texture.image_ready());

    let device = RecordingDevice::default();
    assert_eq!(texture.bind_texture(&device), TextureHandle::NONE);
    assert!(device.calls().is_empty());

    let result = texture.try_bind_image(&device,
                                        texture.image(),
                                        TextureTarget::Texture2D,
                                        TextureFormat::RGBA8,
                                        TextureFilter::Linear,
                                        TextureFilter::Linear);
    assert_eq!(result, Err(TextureError::UninitializedContext));

    testing_logger::validate(|captured_logs| {
        let warnings: Vec<_> = captured_logs.iter().filter(|log| log.level == Level::Warn).collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].body.contains("not initialized"));
    });

    // Once the host is ready the same texture uploads fine.
    context.set_initialized(true);
    assert!(context.initialized());
    assert_eq!(texture.bind_texture(&device), TextureHandle(1));
}

#[test]
fn test_bind_image_rejects_null_image() {
    testing_logger::setup();

    let texture = ready_texture();
    let device = RecordingDevice::default();
    let handle = texture.bind_image(&device,
                                    &PixelBuffer::null(),
                                    TextureTarget::Texture2D,
                                    TextureFormat::RGBA8,
                                    TextureFilter::Linear,
                                    TextureFilter::Linear);
    assert_eq!(handle, TextureHandle::NONE);
    assert!(device.calls().is_empty());

    testing_logger::validate(|captured_logs| {
        let warnings: Vec<_> = captured_logs.iter().filter(|log| log.level == Level::Warn).collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].body.contains("null image"));
    });
}

#[test]
fn test_bind_image_reorders_native_buffers() {
    let texture = ready_texture();
    let device = RecordingDevice::default();
    let image = solid_image(1, 1, Pixel::new(10, 20, 30, 40));
    let handle = texture.bind_image(&device,
                                    &image,
                                    TextureTarget::Texture2D,
                                    TextureFormat::RGBA8,
                                    TextureFilter::Linear,
                                    TextureFilter::Linear);
    assert_eq!(handle, TextureHandle(1));
    assert_eq!(device.uploaded_bytes(), vec![10, 20, 30, 40]);
}
