//! Built-in trial programs.
//!
//! Each program references one symbol of the target library so that the
//! link step fails when the library is missing or ABI-incompatible. They are
//! only compiled and linked, never run.

/// NetCDF: report the library version string.
pub const NETCDF_TRIAL: &str = r#"#include <netcdf.h>

int main() {
    const char* version = nc_inq_libvers();
    return version == 0;
}
"#;

/// zlib: report the library version string.
pub const COMPRESSION_TRIAL: &str = r#"#include <zlib.h>

int main() {
    const char* version = zlibVersion();
    return version == 0;
}
"#;

/// BLAS: a 1x1 matrix product through the Fortran-ABI `dgemm_` symbol.
pub const LINALG_TRIAL: &str = r#"extern "C" void dgemm_(const char* transa, const char* transb,
                       const int* m, const int* n, const int* k,
                       const double* alpha, const double* a, const int* lda,
                       const double* b, const int* ldb,
                       const double* beta, double* c, const int* ldc);

int main() {
    int n = 1;
    double one = 1.0, zero = 0.0, a = 2.0, b = 3.0, c = 0.0;
    dgemm_("N", "N", &n, &n, &n, &one, &a, &n, &b, &n, &zero, &c, &n);
    return c == 6.0 ? 0 : 1;
}
"#;

pub const NETCDF_SOURCE: &str = "testp.cpp";
pub const COMPRESSION_SOURCE: &str = "testz.cpp";
pub const LINALG_SOURCE: &str = "testblas.cpp";

/// Built-in program for a trial-source identifier, if there is one.
pub fn builtin_source(identifier: &str) -> Option<&'static str> {
    match identifier {
        NETCDF_SOURCE => Some(NETCDF_TRIAL),
        COMPRESSION_SOURCE => Some(COMPRESSION_TRIAL),
        LINALG_SOURCE => Some(LINALG_TRIAL),
        _ => None,
    }
}
