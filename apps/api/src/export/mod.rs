// Export: HTML rendering for delivery plus the (simulated) delivery channel.

pub mod dispatcher;
pub mod html;
