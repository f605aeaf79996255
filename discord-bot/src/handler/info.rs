use serenity::{client::Context, model::channel::Message};

use super::send_embed;

pub(crate) async fn info(context: Context, message: Message, invite_url: &str) {
    send_embed(&context, &message, |e| {
        e.title("**INFO**")
            .field(
                "Invite",
                format!("open {} to add this bot to your servers", invite_url),
                false,
            )
            .field(
                "Randomness",
                "Every roll uses a generator seeded from a regularly reseeded ChaCha20 stream.",
                false,
            )
    })
    .await
}
