//! Source rendering for planned accessors.

use crate::{AccessorPlan, ArtifactShape, GeneratorOptions};
use msgspec_core::ArgType;
use std::fmt::{self, Write};

/// Line-oriented writer with four-space indentation.
struct Emitter {
    out: String,
    indent: usize,
}

impl Emitter {
    fn line(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        writeln!(self.out, "{:width$}{args}", "", width = self.indent * 4)
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }
}

macro_rules! emit {
    ($e:expr, $($arg:tt)*) => {
        $e.line(format_args!($($arg)*))?
    };
}

/// Bundle-level data shared by every accessor.
pub(crate) struct BundleHeader<'a> {
    pub(crate) name: &'a str,
    pub(crate) main_locale: &'a str,
    pub(crate) locales: Vec<&'a str>,
}

/// Renders the whole artifact.
pub(crate) fn render(
    header: &BundleHeader<'_>,
    plans: &[AccessorPlan<'_>],
    options: &GeneratorOptions,
) -> Result<String, fmt::Error> {
    let rt = options.runtime_path.trim_end_matches("::");
    let mut e = Emitter {
        out: String::with_capacity(4096),
        indent: 0,
    };

    emit!(e, "// @generated by msgspec-codegen from bundle {:?}. DO NOT EDIT.", header.name);
    e.blank();

    if options.shape == ArtifactShape::Namespace {
        emit!(e, "#[doc = {:?}]", format!("Typed accessors for message bundle `{}`.", header.name));
        emit!(e, "pub mod {} {{", options.namespace);
        e.indent += 1;
    }

    render_constants(&mut e, header, plans)?;
    for plan in plans {
        e.blank();
        render_accessor(&mut e, plan, rt)?;
    }

    if options.shape == ArtifactShape::Namespace {
        e.indent -= 1;
        emit!(e, "}}");
    }

    Ok(e.out)
}

fn render_constants(
    e: &mut Emitter,
    header: &BundleHeader<'_>,
    plans: &[AccessorPlan<'_>],
) -> fmt::Result {
    emit!(e, "/// Canonical locale of the bundle.");
    emit!(e, "pub const MAIN_LOCALE: &str = {:?};", header.main_locale);
    e.blank();

    emit!(e, "/// Every locale the bundle tracks, in tag order.");
    emit!(e, "pub const LOCALES: &[&str] = &[");
    e.indent += 1;
    for locale in &header.locales {
        emit!(e, "{locale:?},");
    }
    e.indent -= 1;
    emit!(e, "];");
    e.blank();

    emit!(e, "/// Prefix-stripped keys that have an accessor, in key order.");
    emit!(e, "pub const KEYS: &[&str] = &[");
    e.indent += 1;
    for plan in plans {
        emit!(e, "{:?},", plan.key);
    }
    e.indent -= 1;
    emit!(e, "];");
    Ok(())
}

fn render_accessor(e: &mut Emitter, plan: &AccessorPlan<'_>, rt: &str) -> fmt::Result {
    let ty = &plan.type_name;
    let builder = &plan.builder_name;
    let arity = plan.signature.len();

    emit!(e, "#[doc = {:?}]", format!("`{}`: {}", plan.key, plan.main_template));
    emit!(e, "pub const {}: {ty} = {ty};", plan.constant);
    e.blank();

    emit!(e, "#[doc = {:?}]", format!("Accessor for key `{}`.", plan.full_key));
    emit!(e, "///");
    emit!(e, "/// Signature: `{}`.", plan.signature);
    emit!(e, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]");
    emit!(e, "pub struct {ty};");
    e.blank();

    emit!(e, "impl {ty} {{");
    e.indent += 1;
    emit!(e, "/// Full resource key.");
    emit!(e, "pub const KEY: &'static str = {:?};", plan.full_key);
    emit!(e, "/// Prefix-stripped key.");
    emit!(e, "pub const NAME: &'static str = {:?};", plan.key);
    emit!(e, "/// Templates per locale tag, in tag order.");
    emit!(e, "pub const TEMPLATES: &'static [(&'static str, &'static str)] = &[");
    e.indent += 1;
    for (locale, template) in &plan.templates {
        emit!(e, "({locale:?}, {template:?}),");
    }
    e.indent -= 1;
    emit!(e, "];");
    e.blank();
    emit!(e, "/// Starts formatting this message.");
    emit!(e, "pub fn format(&self) -> {builder} {{");
    e.indent += 1;
    emit!(e, "{builder} {{");
    e.indent += 1;
    emit!(e, "args: ::std::vec![{rt}::MessageArg::Missing; {arity}],");
    e.indent -= 1;
    emit!(e, "}}");
    e.indent -= 1;
    emit!(e, "}}");
    if arity == 0 {
        e.blank();
        emit!(e, "/// Formats this message for `locale`.");
        emit!(e, "#[must_use]");
        emit!(e, "pub fn with_locale(&self, locale: &{rt}::LocaleTag) -> ::std::string::String {{");
        e.indent += 1;
        emit!(e, "self.format().with_locale(locale)");
        e.indent -= 1;
        emit!(e, "}}");
    }
    e.blank();
    render_parse(e, ty, arity, rt)?;
    e.indent -= 1;
    emit!(e, "}}");
    e.blank();

    emit!(e, "/// Argument builder for [`{ty}`].");
    emit!(e, "#[derive(Debug, Clone, PartialEq)]");
    emit!(e, "#[must_use]");
    emit!(e, "pub struct {builder} {{");
    e.indent += 1;
    emit!(e, "args: ::std::vec::Vec<{rt}::MessageArg>,");
    e.indent -= 1;
    emit!(e, "}}");
    e.blank();

    emit!(e, "impl {builder} {{");
    e.indent += 1;
    for arg in plan.signature.iter() {
        let (param, value) = match arg.arg_type {
            ArgType::Untyped => (format!("{rt}::MessageArg"), "value.into()".to_string()),
            ArgType::String => (
                "::std::string::String".to_string(),
                format!("{rt}::MessageArg::Text(value.into())"),
            ),
            ArgType::Number | ArgType::Choice => (
                format!("{rt}::Number"),
                format!("{rt}::MessageArg::Number(value.into())"),
            ),
            ArgType::Date => (
                format!("{rt}::DateTimeValue"),
                format!("{rt}::MessageArg::Date(value.into())"),
            ),
        };
        emit!(e, "/// Sets argument {} (`{}`).", arg.index, arg.arg_type);
        emit!(
            e,
            "pub fn arg{}(mut self, value: impl ::core::convert::Into<{param}>) -> Self {{",
            arg.index
        );
        e.indent += 1;
        emit!(e, "self.args[{}] = {value};", arg.index);
        emit!(e, "self");
        e.indent -= 1;
        emit!(e, "}}");
        e.blank();
    }
    emit!(e, "/// Formats the message for `locale`.");
    emit!(e, "#[must_use]");
    emit!(e, "pub fn with_locale(&self, locale: &{rt}::LocaleTag) -> ::std::string::String {{");
    e.indent += 1;
    emit!(e, "{rt}::render({ty}::TEMPLATES, MAIN_LOCALE, locale, &self.args)");
    e.indent -= 1;
    emit!(e, "}}");
    e.indent -= 1;
    emit!(e, "}}");

    Ok(())
}

fn render_parse(e: &mut Emitter, ty: &str, arity: usize, rt: &str) -> fmt::Result {
    emit!(e, "/// Recovers the arguments of a message formatted for `locale`.");
    emit!(e, "///");
    emit!(e, "/// The result has one entry per argument of the signature; entries");
    emit!(e, "/// the locale's template omits are `MessageArg::Missing`.");
    emit!(e, "///");
    emit!(e, "/// # Errors");
    emit!(e, "///");
    emit!(e, "/// Fails when `text` does not follow the locale's template.");
    emit!(e, "pub fn parse(");
    e.indent += 1;
    emit!(e, "&self,");
    emit!(e, "locale: &{rt}::LocaleTag,");
    emit!(e, "text: &str,");
    e.indent -= 1;
    emit!(
        e,
        ") -> ::core::result::Result<::std::vec::Vec<{rt}::MessageArg>, {rt}::FormatError> {{"
    );
    e.indent += 1;
    emit!(e, "let mut args = {rt}::parse({ty}::TEMPLATES, MAIN_LOCALE, locale, text)?;");
    emit!(e, "args.resize({arity}, {rt}::MessageArg::Missing);");
    emit!(e, "::core::result::Result::Ok(args)");
    e.indent -= 1;
    emit!(e, "}}");
    Ok(())
}
