fn main() {
    // Re-embed frontend files when they change
    println!("cargo:rerun-if-changed=../../frontend/");
}
