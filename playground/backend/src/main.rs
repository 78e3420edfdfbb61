use moon::*;

async fn frontend() -> Frontend {
    Frontend::new()
        .title("Code Playground")
        .append_to_head("<style>html, body, #app { height: 100%; margin: 0; }</style>")
}

// The playground has no server state; the frontend never sends messages.
async fn up_msg_handler(_: UpMsgRequest<()>) {}

#[moon::main]
async fn main() -> std::io::Result<()> {
    start(frontend, up_msg_handler, |_| {}).await
}
