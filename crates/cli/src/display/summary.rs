use interceptor_gen_core::{GeneratedPlugin, ParameterSpec};

pub fn print_plugin_summary(plugin: &GeneratedPlugin) {
    println!("🔌 Plugin: {}", plugin.plugin_class);
    println!("   🎯 Method: {}", plugin.interceptor.method_name);
    println!("   📋 Parameters:");
    for param in plugin.interceptor.rendered_parameters() {
        println!("      • {param}");
    }
    println!("   📁 Wiring:");
    for fragment in plugin.config.fragments() {
        println!("      • {}", fragment.path);
    }
}

pub fn print_parameter_spec(method: &str, class: &str, spec: &ParameterSpec) {
    println!("🔍 {class}::{method}");
    match spec {
        ParameterSpec::NoEntry => {
            println!("   ❌ No signature known; the plugin will not forward arguments")
        }
        ParameterSpec::Variadic => {
            println!("   ♾️  Known method with unnamed arguments (forwarded as ...$args)")
        }
        ParameterSpec::Explicit(params) => {
            println!("   ✅ {} parameter(s):", params.len());
            for param in params {
                match &param.default {
                    Some(default) => println!("      • ${} = {}", param.name, default),
                    None => println!("      • ${}", param.name),
                }
            }
        }
    }
}
