//! Build script for compiling the SSO Protocol Buffer definitions with tonic.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_files = ["proto/sso/v1/sso.proto"];

    // Fall back to the bundled protoc when none is provided
    if std::env::var_os("PROTOC").is_none() {
        let protoc = protoc_bin_vendored::protoc_bin_path().map_err(|e| e.to_string())?;
        std::env::set_var("PROTOC", protoc);
    }

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&proto_files, &["proto"])?;

    for proto in &proto_files {
        println!("cargo:rerun-if-changed={proto}");
    }

    Ok(())
}
