fn main() {
    sampler_server::server::run();
}
