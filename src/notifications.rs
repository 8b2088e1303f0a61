use egui::{Align2, Color32, Context, Frame, RichText, vec2};

/// How long a toast stays on screen, in seconds
pub const TOAST_DURATION: f64 = 3.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub text: String,
    pub level: ToastLevel,
    expires_at: f64,
}

/// Short-lived messages stacked in the bottom corner
#[derive(Debug, Default)]
pub struct Notifications {
    toasts: Vec<Toast>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, text: impl Into<String>, now: f64) {
        self.push(text.into(), ToastLevel::Info, now);
    }

    pub fn error(&mut self, text: impl Into<String>, now: f64) {
        self.push(text.into(), ToastLevel::Error, now);
    }

    fn push(&mut self, text: String, level: ToastLevel, now: f64) {
        self.toasts.push(Toast {
            text,
            level,
            expires_at: now + TOAST_DURATION,
        });
    }

    /// Drop expired toasts
    pub fn retain_active(&mut self, now: f64) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn show(&mut self, ctx: &Context) {
        let now = ctx.input(|i| i.time);
        self.retain_active(now);
        if self.toasts.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("notifications"))
            .anchor(Align2::RIGHT_BOTTOM, vec2(-16.0, -16.0))
            .show(ctx, |ui| {
                for toast in &self.toasts {
                    let color = match toast.level {
                        ToastLevel::Info => Color32::WHITE,
                        ToastLevel::Error => Color32::from_rgb(255, 120, 120),
                    };
                    Frame::popup(ui.style()).show(ui, |ui| {
                        ui.label(RichText::new(&toast.text).color(color));
                    });
                }
            });

        // Keep repainting until the last toast has expired
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
