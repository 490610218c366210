//! The build-variable template and placeholder substitution.
//!
//! Placeholders are `{name}`; `{{` and `}}` produce literal braces. The
//! template is flat text with no conditionals, so rendering is pure string
//! interpolation over a fixed set of names.

use std::collections::BTreeMap;

use crate::environment::ResolvedEnvironment;
use crate::error::RenderError;
use crate::platform::PlatformProfile;

/// Template for `config.h`.
///
/// `CPPTRAJ_LIB` is assigned twice on purpose. make evaluates the file top to
/// bottom, so the second assignment is the one the build sees.
pub const CONFIG_TEMPLATE: &str = "\
CPPTRAJHOME={cpptraj_home}
CPPTRAJBIN={cpptraj_bin}
CPPTRAJLIB={cpptraj_lib}

INSTALL_TARGETS={install_targets}

CC={cc}
CXX={cxx}
FC={fc}
CFLAGS={opt_flags} -Wall {defines} -I{include_dir} -Ixdrfile {pic_flag} $(DBGFLAGS)
CXXFLAGS={opt_flags} -Wall {defines} -I{include_dir} -Ixdrfile {pic_flag} -I{include_dir} $(DBGFLAGS)
FFLAGS={opt_flags} {defines} -I{include_dir} -Ixdrfile -ffree-form {pic_flag} $(DBGFLAGS)
SHARED_SUFFIX={shared_suffix}

LIBCPPTRAJ_TARGET=$(CPPTRAJLIB)/libcpptraj$(SHARED_SUFFIX)

NVCC=
NVCCFLAGS=$(DBGFLAGS)
CUDA_TARGET=

READLINE=
READLINE_HOME=readline
READLINE_TARGET=noreadline

XDRFILE=xdrfile/libxdrfile.a
XDRFILE_HOME=xdrfile
XDRFILE_TARGET=xdrfile/libxdrfile.a

FFT_DEPEND=pub_fft.o
FFT_LIB=pub_fft.o

CPPTRAJ_LIB=-L{lib_dir} {linalg_link} {fortran_runtime_link} -w
CPPTRAJ_LIB=-L{lib_dir} {linalg_override_link} {fortran_runtime_link} -w
LDFLAGS=-L{lib_dir} {netcdf_link} {compression_link} xdrfile/libxdrfile.a
SFX={exe_suffix}
EXE={exe_suffix}
";

/// Placeholders filled from `ResolvedEnvironment`.
pub const PATH_PLACEHOLDERS: [&str; 5] = [
    "cpptraj_home",
    "cpptraj_bin",
    "cpptraj_lib",
    "include_dir",
    "lib_dir",
];

/// Named values available to the template.
#[derive(Debug, Clone, Default)]
pub struct TemplateValues {
    values: BTreeMap<&'static str, String>,
}

impl TemplateValues {
    /// Values for `CONFIG_TEMPLATE` from an environment and a profile.
    pub fn new(env: &ResolvedEnvironment, profile: &PlatformProfile) -> Self {
        let mut values = Self::default();
        values
            .insert("cpptraj_home", &env.home_dir)
            .insert("cpptraj_bin", &env.bin_dir)
            .insert("cpptraj_lib", &env.lib_out_dir)
            .insert("include_dir", &env.include_dir)
            .insert("lib_dir", &env.lib_dir)
            .insert("install_targets", profile.install_targets)
            .insert("cc", profile.cc)
            .insert("cxx", profile.cxx)
            .insert("fc", profile.fc)
            .insert("opt_flags", profile.opt_flags)
            .insert("defines", profile.defines)
            .insert("pic_flag", profile.pic_flag)
            .insert("shared_suffix", profile.shared_suffix)
            .insert("exe_suffix", profile.exe_suffix)
            .insert("linalg_link", profile.linalg_link)
            .insert("linalg_override_link", profile.linalg_override_link)
            .insert("fortran_runtime_link", profile.fortran_runtime_link)
            .insert("netcdf_link", profile.netcdf_link)
            .insert("compression_link", profile.compression_link);
        values
    }

    pub fn insert(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        self.values.insert(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Substitute every placeholder in `template`.
///
/// Fails on the first placeholder without a value, so a document with an
/// unresolved token is never produced.
pub fn substitute(template: &str, values: &TemplateValues) -> Result<String, RenderError> {
    let mut out = String::with_capacity(template.len() * 2);

    for (index, line) in template.split_inclusive('\n').enumerate() {
        let line_no = index + 1;
        let mut rest = line;

        while let Some(pos) = rest.find(['{', '}']) {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];

            if let Some(after) = tail.strip_prefix("{{") {
                out.push('{');
                rest = after;
            } else if let Some(after) = tail.strip_prefix("}}") {
                out.push('}');
                rest = after;
            } else if let Some(after) = tail.strip_prefix('{') {
                let end = after
                    .find('}')
                    .ok_or(RenderError::UnterminatedPlaceholder { line: line_no })?;
                let name = &after[..end];
                let value = values
                    .get(name)
                    .ok_or_else(|| RenderError::UnresolvedPlaceholder {
                        name: name.to_string(),
                        line: line_no,
                    })?;
                out.push_str(value);
                rest = &after[end + 1..];
            } else {
                // A lone `}` is kept as-is.
                out.push('}');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
    }

    Ok(out)
}
