//! Base Renderer Integration Tests
//!
//! Tests for:
//! - Default pipeline construction
//! - Frame flow: process, sort, draw, clear
//! - Settings (defaults, JSON, validation)
//! - Mark notification at frame end
//! - Custom stages and buckets

mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::{TestRenderable, camera, labels, material, new_log, two_sided};
use prism::prelude::*;
use serde::{Deserialize, Serialize};

fn renderer() -> BaseRenderer<StateContext> {
    BaseRenderer::with_default_pipeline(StateContext::with_camera(camera()), RendererSettings::default())
        .unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn default_pipeline_stage_order() {
    let renderer = renderer();
    let names: Vec<_> = renderer.stages().names().collect();
    assert_eq!(names, ["PreOpaque", "Opaque", "PostOpaque", "Transparent", "Ortho"]);
    assert_eq!(renderer.queue().bucket_count(), 5);
    assert_eq!(renderer.queue().entry_count(), 0);
}

#[test]
fn with_settings_has_buckets_but_no_stages() {
    let renderer =
        BaseRenderer::with_settings(StateContext::new(), RendererSettings::default()).unwrap();
    assert!(renderer.stages().is_empty());
    assert_eq!(renderer.queue().bucket_count(), 5);
    assert!(renderer.queue().bucket(RenderBucketId::OPAQUE).unwrap().capacity() >= 32);
}

#[test]
fn zero_bucket_capacity_is_rejected() {
    let settings = RendererSettings {
        initial_bucket_capacity: 0,
        ..Default::default()
    };
    let result = BaseRenderer::with_default_pipeline(StateContext::new(), settings);
    assert!(matches!(result, Err(PrismError::InvalidArgument(_))));
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn settings_from_json_keep_missing_defaults() {
    let settings = RendererSettings::from_json_str(r#"{ "clear_buckets": false }"#).unwrap();
    assert!(!settings.clear_buckets);
    assert!(settings.sort_buckets);
    assert_eq!(settings.initial_bucket_capacity, 32);
}

#[test]
fn settings_from_json_validate() {
    let zero = RendererSettings::from_json_str(r#"{ "initial_bucket_capacity": 0 }"#);
    assert!(matches!(zero, Err(PrismError::InvalidArgument(_))));

    let malformed = RendererSettings::from_json_str("{ clear_buckets ");
    assert!(matches!(malformed, Err(PrismError::Serialization(_))));
}

/// Application config embedding the renderer section.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct AppConfig {
    title: String,
    #[serde(default)]
    renderer: RendererSettings,
}

#[test]
fn settings_embed_in_application_config() {
    let config: AppConfig = serde_json::from_str(
        r#"{ "title": "demo", "renderer": { "initial_bucket_capacity": 128, "sort_buckets": false } }"#,
    )
    .unwrap();
    assert_eq!(config.renderer.initial_bucket_capacity, 128);
    assert!(!config.renderer.sort_buckets);
    assert!(config.renderer.clear_buckets);
    config.renderer.validate().unwrap();

    let json = serde_json::to_string(&config).unwrap();
    let back: AppConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);

    let bare: AppConfig = serde_json::from_str(r#"{ "title": "bare" }"#).unwrap();
    assert_eq!(bare.renderer, RendererSettings::default());
}

// ============================================================================
// Frame Flow
// ============================================================================

#[test]
fn process_rejects_renderable_not_valid_for_draw() {
    let log = new_log();
    let mut renderer = renderer();
    let r = TestRenderable::new("ghost", &log)
        .with_material(RenderBucketId::OPAQUE, material("m", 1))
        .invalid()
        .into_ref();

    assert!(!renderer.process(&r));
    assert_eq!(renderer.queue().entry_count(), 0);
}

#[test]
fn render_frame_draws_stages_in_order_then_clears() {
    common::init_logger();
    let log = new_log();
    let mut renderer = renderer();

    let hud = TestRenderable::new("hud", &log)
        .with_material(RenderBucketId::ORTHO, material("hud", 3))
        .into_ref();
    let glass = TestRenderable::new("glass", &log)
        .at_depth(2.0)
        .with_material(RenderBucketId::TRANSPARENT, material("glass", 2))
        .into_ref();
    let wall = TestRenderable::new("wall", &log)
        .at_depth(4.0)
        .with_material(RenderBucketId::OPAQUE, material("stone", 1))
        .into_ref();

    for r in [&hud, &glass, &wall] {
        assert!(renderer.process(r));
    }
    renderer.render_frame();

    assert_eq!(labels(&log), ["wall", "glass", "hud"]);
    assert_eq!(renderer.context().stats().draw_calls, 3);
    assert_eq!(renderer.queue().entry_count(), 0);
}

#[test]
fn render_without_sort_or_clear_keeps_insertion_order() {
    let log = new_log();
    let mut renderer = renderer();

    let far = TestRenderable::new("far", &log)
        .at_depth(10.0)
        .with_material(RenderBucketId::OPAQUE, material("m", 1))
        .into_ref();
    let near = TestRenderable::new("near", &log)
        .at_depth(1.0)
        .with_material(RenderBucketId::OPAQUE, material("m", 1))
        .into_ref();
    renderer.process(&far);
    renderer.process(&near);

    renderer.render(false, false);
    assert_eq!(labels(&log), ["far", "near"]);
    assert_eq!(renderer.queue().entry_count(), 2);

    log.borrow_mut().clear();
    renderer.render(true, true);
    assert_eq!(labels(&log), ["near", "far"]);
    assert_eq!(renderer.queue().entry_count(), 0);
}

#[test]
fn render_frame_honours_clear_setting() {
    let log = new_log();
    let settings = RendererSettings::from_json_str(r#"{ "clear_buckets": false }"#).unwrap();
    let mut renderer =
        BaseRenderer::with_default_pipeline(StateContext::with_camera(camera()), settings).unwrap();

    let r = TestRenderable::new("r", &log)
        .with_material(RenderBucketId::OPAQUE, material("m", 1))
        .into_ref();
    renderer.process(&r);

    renderer.render_frame();
    renderer.render_frame();

    assert_eq!(labels(&log), ["r", "r"]);
    assert_eq!(renderer.queue().entry_count(), 1);
}

#[test]
fn render_frame_restores_context_state_after_two_sided_glass() {
    let log = new_log();
    let mut renderer = renderer();
    let glass = TestRenderable::new("glass", &log)
        .with_material(RenderBucketId::TRANSPARENT, two_sided("glass", 2))
        .into_ref();
    renderer.process(&glass);

    renderer.render_frame();

    assert_eq!(log.borrow().len(), 2);
    let ctx = renderer.context();
    assert_eq!(ctx.enforced_state(), EnforcedRenderState::empty());
    assert_eq!(ctx.rasterizer_state(), RasterizerState::CULL_BACK);
    assert_eq!(ctx.depth_stencil_state(), DepthStencilState::DEFAULT);
}

// ============================================================================
// Marks
// ============================================================================

#[test]
fn marks_are_notified_at_frame_end() {
    let log = new_log();
    let mut renderer = renderer();
    let r = Rc::new(TestRenderable::new("picked", &log).markable());
    let handle: RenderableRef = r.clone();
    let id = MarkId::generate_new_unique_id();

    assert!(renderer.queue_mut().mark(id, &handle));
    renderer.render_frame();

    assert_eq!(*r.cleared_marks.borrow(), [id]);
    assert_eq!(renderer.queue().marked_count(), 0);
}

#[test]
fn marks_clear_silently_when_notification_disabled() {
    let log = new_log();
    let settings = RendererSettings {
        notify_marked_on_clear: false,
        ..Default::default()
    };
    let mut renderer = BaseRenderer::with_default_pipeline(StateContext::new(), settings).unwrap();
    let r = Rc::new(TestRenderable::new("picked", &log).markable());
    let handle: RenderableRef = r.clone();

    assert!(renderer.queue_mut().mark(MarkId::generate_new_unique_id(), &handle));
    renderer.render_frame();

    assert!(r.cleared_marks.borrow().is_empty());
    assert_eq!(renderer.queue().marked_count(), 0);
}

// ============================================================================
// Custom Pipeline
// ============================================================================

struct CountingStage {
    runs: Rc<Cell<u32>>,
}

impl RenderStage for CountingStage {
    fn name(&self) -> &str {
        "Counting"
    }

    fn execute(&mut self, _ctx: &mut dyn RenderContext, _queue: &RenderQueue) {
        self.runs.set(self.runs.get() + 1);
    }
}

#[test]
fn custom_bucket_and_stage_run_first() {
    let log = new_log();
    let shadow = RenderBucketId::register_id("RendererShadow").unwrap();
    let mut renderer = renderer();

    let bucket = RenderBucket::new(shadow, Box::new(OpaqueComparer::new()), 8).unwrap();
    renderer.queue_mut().add_bucket(bucket).unwrap();
    renderer
        .stages_mut()
        .insert(0, SimpleRenderStage::new("Shadow", shadow))
        .unwrap();

    let runs = Rc::new(Cell::new(0));
    renderer
        .stages_mut()
        .add(CountingStage { runs: Rc::clone(&runs) })
        .unwrap();

    let caster = TestRenderable::new("caster", &log)
        .with_material(shadow, material("depth", 9))
        .with_material(RenderBucketId::OPAQUE, material("lit", 1))
        .into_ref();
    renderer.process(&caster);
    renderer.render_frame();

    let buckets: Vec<_> = log.borrow().iter().map(|r| r.bucket).collect();
    assert_eq!(buckets, [shadow, RenderBucketId::OPAQUE]);
    assert_eq!(runs.get(), 1);
    assert_eq!(renderer.stages().len(), 7);
}

#[test]
fn removed_stage_no_longer_draws() {
    let log = new_log();
    let mut renderer = renderer();
    assert!(renderer.stages_mut().remove("Ortho").is_some());

    let hud = TestRenderable::new("hud", &log)
        .with_material(RenderBucketId::ORTHO, material("hud", 3))
        .into_ref();
    renderer.process(&hud);
    renderer.render_frame();

    assert!(log.borrow().is_empty());
    assert_eq!(renderer.queue().entry_count(), 0);
}
