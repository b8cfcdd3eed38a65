use eframe::egui;
use tokio::sync::mpsc;

/// A wrapper around tokio::sync::mpsc::Sender that triggers egui repaints
/// every time a message is sent.
///
/// Backend tasks finish while the UI is idle; the repaint makes sure their
/// results are picked up on the next frame.
pub struct SenderAsync<T> {
    sender: mpsc::Sender<T>,
    ctx: egui::Context,
}

impl<T> SenderAsync<T> {
    /// Create a new SenderAsync wrapper
    pub fn new(sender: mpsc::Sender<T>, ctx: egui::Context) -> Self {
        Self { sender, ctx }
    }

    /// Send a message and trigger a repaint
    pub async fn send(&self, value: T) -> Result<(), mpsc::error::SendError<T>> {
        let result = self.sender.send(value).await;
        if result.is_ok() {
            self.ctx.request_repaint();
        }
        result
    }

    /// Check if the receiving side has been dropped
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl<T> Clone for SenderAsync<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            ctx: self.ctx.clone(),
        }
    }
}

pub trait EguiMpscAsync<T> {
    fn with_egui_ctx(self, ctx: egui::Context) -> (SenderAsync<T>, mpsc::Receiver<T>);
}

impl<T> EguiMpscAsync<T> for (mpsc::Sender<T>, mpsc::Receiver<T>) {
    fn with_egui_ctx(self, ctx: egui::Context) -> (SenderAsync<T>, mpsc::Receiver<T>) {
        let sender = SenderAsync::new(self.0, ctx);
        (sender, self.1)
    }
}
