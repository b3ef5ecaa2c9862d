/// Host frame scheduling primitive.
///
/// `request_frame` asks the host to invoke `AnimationController::tick` once,
/// on the next display refresh, with a monotonically increasing timestamp in
/// milliseconds. The controller never asks for more than one outstanding
/// frame; after a tick the host re-requests only when `tick` returned `true`.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}
