use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let out_dir = PathBuf::from(&crate_dir).join("include");

    // Create output directory if it doesn't exist
    std::fs::create_dir_all(&out_dir).ok();

    // Generate the C header consumed by the iOS module
    cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("DIDCOMM_SDK_H")
        .with_header(
            "/* DIDComm SDK native interface.\n\
              * Every char* returned by these functions is owned by the caller\n\
              * and must be released with free_string(). */",
        )
        .generate()
        .unwrap()
        .write_to_file(out_dir.join("didcomm.h"));
}
