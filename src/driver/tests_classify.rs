use super::flags::classify_flags;
use super::options::InvocationOptions;
use super::sources::classify_sources;
use super::tokenizer::normalize;
use crate::error::DriverError;

fn toks(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Runs the full classification pipeline, returning the options and the
/// final passthrough tokens.
fn classify(args: &[&str]) -> (InvocationOptions, Vec<String>) {
    let mut opts = InvocationOptions::default();
    let tokens = normalize(&toks(args));
    let residual = classify_flags(tokens, &mut opts);
    let passthrough = classify_sources(residual, &mut opts).unwrap();
    (opts, passthrough)
}

#[test]
fn test_normalize_collapses_whitespace() {
    let tokens = normalize(&toks(&["  -c   foo.cpp ", "-o", "out"]));
    assert_eq!(tokens, toks(&["-c", "foo.cpp", "-o", "out"]));
}

#[test]
fn test_normalize_rewrites_two_token_dash_x() {
    let tokens = normalize(&toks(&["-x", "hip", "a.cpp", "-x", "c", "b.c"]));
    assert_eq!(tokens, toks(&["-xhip", "a.cpp", "-xc", "b.c"]));
}

#[test]
fn test_normalize_keeps_single_token_dash_x() {
    let tokens = normalize(&toks(&["-xc++", "a.cpp"]));
    assert_eq!(tokens, toks(&["-xc++", "a.cpp"]));
}

#[test]
fn test_normalize_truncates_at_shell_control() {
    let tokens = normalize(&toks(&["a.cpp", "&&", "rm", "-rf", "/"]));
    assert_eq!(tokens, toks(&["a.cpp"]));

    let tokens = normalize(&toks(&["a.cpp", ">", "out.log"]));
    assert_eq!(tokens, toks(&["a.cpp"]));

    let tokens = normalize(&toks(&["a.cpp;echo hi"]));
    assert_eq!(tokens, toks(&["a.cpp"]));
}

#[test]
fn test_compile_only_is_set_and_kept_in_residual() {
    let mut opts = InvocationOptions::default();
    let residual = classify_flags(toks(&["-c", "foo.cpp"]), &mut opts);
    assert!(opts.compile_only.is_present());
    assert_eq!(residual, toks(&["-c", "foo.cpp"]));
}

#[test]
fn test_offload_marker_is_consumed() {
    let mut opts = InvocationOptions::default();
    let residual = classify_flags(toks(&["--offload=spirv64", "a.o"]), &mut opts);
    assert!(opts.offload.is_present());
    assert_eq!(residual, toks(&["a.o"]));
}

#[test]
fn test_rdc_marker_is_set_and_kept() {
    let mut opts = InvocationOptions::default();
    let residual = classify_flags(toks(&["-fgpu-rdc", "a.o"]), &mut opts);
    assert!(opts.rdc.is_present());
    assert_eq!(residual, toks(&["-fgpu-rdc", "a.o"]));
}

#[test]
fn test_print_flags_clear_run_cmd() {
    for flag in ["--short-version", "--cxxflags", "--ldflags"] {
        let mut opts = InvocationOptions::default();
        classify_flags(toks(&[flag]), &mut opts);
        assert!(!opts.run_cmd, "{} must not invoke the compiler", flag);
    }
}

#[test]
fn test_output_flag_captures_joined_value() {
    let mut opts = InvocationOptions::default();
    let residual = classify_flags(toks(&["-o", "foo.o", "bar.cpp"]), &mut opts);
    assert!(opts.output.is_present());
    assert_eq!(opts.output.values(), ["-o foo.o"]);
    assert_eq!(residual, toks(&["bar.cpp"]));
}

#[test]
fn test_dependency_flags_capture_joined_values() {
    let mut opts = InvocationOptions::default();
    let residual = classify_flags(toks(&["-MT", "target", "-MF", "deps.d"]), &mut opts);
    assert_eq!(opts.dep_target.values(), ["-MT target"]);
    assert_eq!(opts.dep_file.values(), ["-MF deps.d"]);
    assert!(residual.is_empty());
}

#[test]
fn test_two_token_flag_at_end_of_input_degrades_silently() {
    let mut opts = InvocationOptions::default();
    let residual = classify_flags(toks(&["a.cpp", "-o"]), &mut opts);
    assert!(opts.output.is_present());
    assert!(opts.output.values().is_empty());
    assert_eq!(residual, toks(&["a.cpp"]));
}

#[test]
fn test_unrecognized_tokens_keep_their_order() {
    let mut opts = InvocationOptions::default();
    let residual = classify_flags(
        toks(&["-I/inc", "-o", "out", "-DFOO=1", "-c", "-Wall"]),
        &mut opts,
    );
    assert_eq!(residual, toks(&["-I/inc", "-DFOO=1", "-c", "-Wall"]));
}

#[test]
fn test_suffix_classification() {
    let (opts, passthrough) = classify(&[
        "-xc", "a.foo", // sticky C first so later buckets stay put
    ]);
    assert_eq!(opts.sources_c.files(), ["a.foo"]);
    assert!(passthrough.is_empty());

    let (opts, passthrough) = classify(&["main.c", "util.cxx", "kern.cu", "obj.o", "-lm"]);
    assert_eq!(opts.sources_c.files(), ["main.c"]);
    assert_eq!(opts.objects.files(), ["obj.o"]);
    // util.cxx was reassigned: no explicit -x appeared
    assert!(opts.sources_cxx.is_empty());
    assert_eq!(opts.sources_kernel.files(), ["kern.cu", "util.cxx"]);
    assert_eq!(passthrough, toks(&["-lm"]));
}

#[test]
fn test_cpp_sources_default_to_kernel_bucket() {
    let (opts, _) = classify(&["-c", "foo.cpp", "-o", "foo.o"]);
    assert!(opts.sources_cxx.is_empty());
    assert!(!opts.sources_cxx.is_present());
    assert_eq!(opts.sources_kernel.files(), ["foo.cpp"]);
    assert_eq!(opts.output.values(), ["-o foo.o"]);
    assert!(opts.compile_only.is_present());
    assert!(!opts.link_only);
}

#[test]
fn test_explicit_dash_x_keeps_cpp_sources() {
    let (opts, _) = classify(&["-x", "c++", "foo.cpp"]);
    assert!(opts.dash_x_active);
    assert_eq!(opts.sources_cxx.files(), ["foo.cpp"]);
    assert!(opts.sources_kernel.is_empty());
}

#[test]
fn test_sticky_mode_overrides_suffix_detection() {
    let (opts, _) = classify(&["-xc", "a.foo", "-xhip", "b.hip"]);
    assert_eq!(opts.sources_c.files(), ["a.foo"]);
    assert_eq!(opts.sources_kernel.files(), ["b.hip"]);
}

#[test]
fn test_sticky_mode_captures_flag_like_tokens() {
    let (opts, passthrough) = classify(&["-DX=1", "-xhip", "k.hip", "-DY=2"]);
    assert_eq!(passthrough, toks(&["-DX=1"]));
    assert_eq!(opts.sources_kernel.files(), ["k.hip", "-DY=2"]);
}

#[test]
fn test_object_files_pass_through_sticky_mode() {
    let (opts, _) = classify(&["-xhip", "k.hip", "prebuilt.o"]);
    assert_eq!(opts.sources_kernel.files(), ["k.hip"]);
    assert_eq!(opts.objects.files(), ["prebuilt.o"]);
}

#[test]
fn test_marker_without_files_keeps_bucket_present() {
    let (opts, _) = classify(&["-xhip"]);
    assert!(opts.sources_kernel.is_present());
    assert!(opts.sources_kernel.is_empty());
    assert!(opts.link_only);
}

#[test]
fn test_link_only_with_objects_and_link_flags() {
    let (opts, passthrough) = classify(&["a.o", "b.o", "-L/lib", "-lfoo"]);
    assert!(opts.link_only);
    assert_eq!(opts.objects.files(), ["a.o", "b.o"]);
    assert_eq!(passthrough, toks(&["-L/lib", "-lfoo"]));
}

#[test]
fn test_sources_clear_link_only() {
    let (opts, _) = classify(&["a.o", "kern.hip"]);
    assert!(!opts.link_only);
}

#[test]
fn test_classification_is_deterministic() {
    let args = ["-xc", "a.foo", "-xhip", "b.hip", "obj.o", "-DZ"];
    let (first, first_pass) = classify(&args);
    let (second, second_pass) = classify(&args);
    assert_eq!(first.sources_c.files(), second.sources_c.files());
    assert_eq!(first.sources_kernel.files(), second.sources_kernel.files());
    assert_eq!(first.objects.files(), second.objects.files());
    assert_eq!(first_pass, second_pass);
}

#[test]
fn test_unsupported_language_is_a_usage_error() {
    let mut opts = InvocationOptions::default();
    let err = classify_sources(toks(&["-xfortran", "a.f90"]), &mut opts).unwrap_err();
    assert!(matches!(err, DriverError::Usage(_)));
    assert_eq!(err.to_string(), "-x fortran is not supported");
}

#[test]
fn test_bare_dash_x_is_a_usage_error() {
    let mut opts = InvocationOptions::default();
    let err = classify_sources(toks(&["-x"]), &mut opts).unwrap_err();
    assert!(matches!(err, DriverError::Usage(_)));
}
