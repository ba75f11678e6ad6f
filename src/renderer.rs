use crate::camera::Camera;
use glam::Vec2;
use glow::*;
use std::mem;
use std::sync::Arc;

const QUAD_VERTEX_SHADER_SRC: &str = r#"#version 330 core
layout (location = 0) in vec2 aPos;
layout (location = 1) in vec2 aInstancePos;
layout (location = 2) in float aInstanceSize;
layout (location = 3) in vec4 aInstanceColor;

uniform mat4 uProjection;

out vec2 vLocal;
out vec4 vColor;

void main() {
    vec2 worldPos = aInstancePos + aPos * aInstanceSize;
    gl_Position = uProjection * vec4(worldPos, 0.0, 1.0);
    vLocal = aPos;
    vColor = aInstanceColor;
}
"#;

const QUAD_FRAGMENT_SHADER_SRC: &str = r#"#version 330 core
in vec2 vLocal;
in vec4 vColor;
out vec4 FragColor;

void main() {
    // Soft round glow instead of a hard square
    float falloff = 1.0 - smoothstep(0.25, 0.5, length(vLocal));
    FragColor = vec4(vColor.rgb, vColor.a * falloff);
}
"#;

const LINE_VERTEX_SHADER_SRC: &str = r#"#version 330 core
layout (location = 0) in vec2 aPos;

uniform mat4 uProjection;

void main() {
    gl_Position = uProjection * vec4(aPos, 0.0, 1.0);
}
"#;

const LINE_FRAGMENT_SHADER_SRC: &str = r#"#version 330 core
uniform vec4 uColor;
out vec4 FragColor;

void main() {
    FragColor = uColor;
}
"#;

const BACKGROUND_VERTEX_SHADER_SRC: &str = r#"#version 330 core
layout (location = 0) in vec2 aPos;

uniform mat4 uProjection;
uniform vec4 uRect;

out vec2 vUv;

void main() {
    vec2 worldPos = mix(uRect.xy, uRect.zw, aPos + 0.5);
    gl_Position = uProjection * vec4(worldPos, 0.0, 1.0);
    vUv = vec2(aPos.x + 0.5, 0.5 - aPos.y);
}
"#;

const BACKGROUND_FRAGMENT_SHADER_SRC: &str = r#"#version 330 core
in vec2 vUv;
uniform sampler2D uTexture;
out vec4 FragColor;

void main() {
    FragColor = texture(uTexture, vUv);
}
"#;

/// Floats per quad instance: position (2) + size (1) + color (4)
const QUAD_INSTANCE_FLOATS: usize = 7;

/// One instanced quad, centered on `position`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub position: Vec2,
    pub size: f32,
    pub color: [f32; 4],
}

pub struct Renderer {
    gl: Arc<glow::Context>,
    quad_program: NativeProgram,
    quad_vao: NativeVertexArray,
    quad_vbo: NativeBuffer,
    instance_vbo: NativeBuffer,
    quad_projection_loc: NativeUniformLocation,
    // Date grid lines
    line_program: NativeProgram,
    line_vao: NativeVertexArray,
    line_vbo: NativeBuffer,
    line_projection_loc: NativeUniformLocation,
    line_color_loc: NativeUniformLocation,
    // Optional background image
    background_program: NativeProgram,
    background_vao: NativeVertexArray,
    background_projection_loc: NativeUniformLocation,
    background_rect_loc: NativeUniformLocation,
    background_texture: Option<NativeTexture>,
}

unsafe fn compile_program(gl: &glow::Context, name: &str, vertex_src: &str, fragment_src: &str) -> Result<NativeProgram, String> {
    let vertex_shader = gl
        .create_shader(VERTEX_SHADER)
        .map_err(|e| format!("Failed to create {} vertex shader: {}", name, e))?;
    gl.shader_source(vertex_shader, vertex_src);
    gl.compile_shader(vertex_shader);
    if !gl.get_shader_compile_status(vertex_shader) {
        return Err(gl.get_shader_info_log(vertex_shader));
    }

    let fragment_shader = gl
        .create_shader(FRAGMENT_SHADER)
        .map_err(|e| format!("Failed to create {} fragment shader: {}", name, e))?;
    gl.shader_source(fragment_shader, fragment_src);
    gl.compile_shader(fragment_shader);
    if !gl.get_shader_compile_status(fragment_shader) {
        return Err(gl.get_shader_info_log(fragment_shader));
    }

    let program = gl
        .create_program()
        .map_err(|e| format!("Failed to create {} program: {}", name, e))?;
    gl.attach_shader(program, vertex_shader);
    gl.attach_shader(program, fragment_shader);
    gl.link_program(program);
    if !gl.get_program_link_status(program) {
        return Err(gl.get_program_info_log(program));
    }

    gl.delete_shader(vertex_shader);
    gl.delete_shader(fragment_shader);
    Ok(program)
}

unsafe fn uniform(gl: &glow::Context, program: NativeProgram, name: &str) -> Result<NativeUniformLocation, String> {
    gl.get_uniform_location(program, name)
        .ok_or_else(|| format!("Failed to get {} uniform location", name))
}

impl Renderer {
    pub fn new(gl: Arc<glow::Context>) -> Result<Self, String> {
        unsafe {
            let quad_program = compile_program(&gl, "quad", QUAD_VERTEX_SHADER_SRC, QUAD_FRAGMENT_SHADER_SRC)?;
            let quad_projection_loc = uniform(&gl, quad_program, "uProjection")?;

            // Unit quad centered on the origin
            let vertices: [f32; 12] = [
                -0.5, -0.5, // bottom-left
                0.5, -0.5, // bottom-right
                0.5, 0.5, // top-right
                -0.5, -0.5, // bottom-left
                0.5, 0.5, // top-right
                -0.5, 0.5, // top-left
            ];

            let quad_vao = gl
                .create_vertex_array()
                .map_err(|e| format!("Failed to create VAO: {}", e))?;
            gl.bind_vertex_array(Some(quad_vao));

            let quad_vbo = gl
                .create_buffer()
                .map_err(|e| format!("Failed to create VBO: {}", e))?;
            gl.bind_buffer(ARRAY_BUFFER, Some(quad_vbo));
            gl.buffer_data_u8_slice(ARRAY_BUFFER, as_u8_slice(&vertices), STATIC_DRAW);

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, FLOAT, false, 8, 0);

            let instance_vbo = gl
                .create_buffer()
                .map_err(|e| format!("Failed to create instance VBO: {}", e))?;
            gl.bind_buffer(ARRAY_BUFFER, Some(instance_vbo));

            let stride = (QUAD_INSTANCE_FLOATS * mem::size_of::<f32>()) as i32;
            // Position (2 floats)
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 2, FLOAT, false, stride, 0);
            gl.vertex_attrib_divisor(1, 1);
            // Size (1 float)
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(2, 1, FLOAT, false, stride, 8);
            gl.vertex_attrib_divisor(2, 1);
            // Color (4 floats)
            gl.enable_vertex_attrib_array(3);
            gl.vertex_attrib_pointer_f32(3, 4, FLOAT, false, stride, 12);
            gl.vertex_attrib_divisor(3, 1);

            gl.bind_vertex_array(None);

            let line_program = compile_program(&gl, "line", LINE_VERTEX_SHADER_SRC, LINE_FRAGMENT_SHADER_SRC)?;
            let line_projection_loc = uniform(&gl, line_program, "uProjection")?;
            let line_color_loc = uniform(&gl, line_program, "uColor")?;

            let line_vao = gl
                .create_vertex_array()
                .map_err(|e| format!("Failed to create line VAO: {}", e))?;
            gl.bind_vertex_array(Some(line_vao));

            let line_vbo = gl
                .create_buffer()
                .map_err(|e| format!("Failed to create line VBO: {}", e))?;
            gl.bind_buffer(ARRAY_BUFFER, Some(line_vbo));

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, FLOAT, false, 8, 0);

            gl.bind_vertex_array(None);

            // Background reuses the unit quad geometry without instance attributes
            let background_vao = gl
                .create_vertex_array()
                .map_err(|e| format!("Failed to create background VAO: {}", e))?;
            gl.bind_vertex_array(Some(background_vao));
            gl.bind_buffer(ARRAY_BUFFER, Some(quad_vbo));
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, FLOAT, false, 8, 0);
            gl.bind_vertex_array(None);

            let background_program = compile_program(
                &gl,
                "background",
                BACKGROUND_VERTEX_SHADER_SRC,
                BACKGROUND_FRAGMENT_SHADER_SRC,
            )?;
            let background_projection_loc = uniform(&gl, background_program, "uProjection")?;
            let background_rect_loc = uniform(&gl, background_program, "uRect")?;

            // Deep space background
            gl.clear_color(0.01, 0.01, 0.04, 1.0);

            gl.enable(BLEND);
            gl.blend_func(SRC_ALPHA, ONE_MINUS_SRC_ALPHA);

            Ok(Self {
                gl,
                quad_program,
                quad_vao,
                quad_vbo,
                instance_vbo,
                quad_projection_loc,
                line_program,
                line_vao,
                line_vbo,
                line_projection_loc,
                line_color_loc,
                background_program,
                background_vao,
                background_projection_loc,
                background_rect_loc,
                background_texture: None,
            })
        }
    }

    pub fn resize(&self, width: i32, height: i32) {
        unsafe {
            self.gl.viewport(0, 0, width, height);
        }
    }

    pub fn clear(&self) {
        unsafe {
            self.gl.clear(COLOR_BUFFER_BIT);
        }
    }

    /// Upload an RGBA image as the background, replacing any previous one
    pub fn set_background(&mut self, image: &image::RgbaImage) -> Result<(), String> {
        let (width, height) = image.dimensions();
        unsafe {
            let tex = self
                .gl
                .create_texture()
                .map_err(|e| format!("Failed to create texture: {}", e))?;
            self.gl.bind_texture(TEXTURE_2D, Some(tex));

            self.gl.tex_parameter_i32(TEXTURE_2D, TEXTURE_MIN_FILTER, LINEAR as i32);
            self.gl.tex_parameter_i32(TEXTURE_2D, TEXTURE_MAG_FILTER, LINEAR as i32);
            self.gl.tex_parameter_i32(TEXTURE_2D, TEXTURE_WRAP_S, CLAMP_TO_EDGE as i32);
            self.gl.tex_parameter_i32(TEXTURE_2D, TEXTURE_WRAP_T, CLAMP_TO_EDGE as i32);

            self.gl.tex_image_2d(
                TEXTURE_2D,
                0,
                RGBA as i32,
                width as i32,
                height as i32,
                0,
                RGBA,
                UNSIGNED_BYTE,
                Some(image.as_raw()),
            );

            self.gl.bind_texture(TEXTURE_2D, None);

            if let Some(old) = self.background_texture.replace(tex) {
                self.gl.delete_texture(old);
            }
        }
        Ok(())
    }

    /// Stretch the background image over the world rectangle `min..max`
    pub fn draw_background(&self, camera: &Camera, min: Vec2, max: Vec2) {
        let Some(texture) = self.background_texture else {
            return;
        };
        unsafe {
            self.gl.use_program(Some(self.background_program));
            self.gl.bind_vertex_array(Some(self.background_vao));

            let projection = camera.projection_matrix();
            self.gl.uniform_matrix_4_f32_slice(
                Some(&self.background_projection_loc),
                false,
                projection.as_ref(),
            );
            self.gl
                .uniform_4_f32(Some(&self.background_rect_loc), min.x, min.y, max.x, max.y);

            self.gl.active_texture(TEXTURE0);
            self.gl.bind_texture(TEXTURE_2D, Some(texture));

            self.gl.draw_arrays(TRIANGLES, 0, 6);

            self.gl.bind_texture(TEXTURE_2D, None);
            self.gl.bind_vertex_array(None);
        }
    }

    pub fn draw_quads(&mut self, camera: &Camera, quads: &[Quad]) {
        if quads.is_empty() {
            return;
        }

        let mut instance_data = Vec::with_capacity(quads.len() * QUAD_INSTANCE_FLOATS);
        for quad in quads {
            instance_data.push(quad.position.x);
            instance_data.push(quad.position.y);
            instance_data.push(quad.size);
            instance_data.extend_from_slice(&quad.color);
        }

        unsafe {
            self.gl.use_program(Some(self.quad_program));
            self.gl.bind_vertex_array(Some(self.quad_vao));

            self.gl.bind_buffer(ARRAY_BUFFER, Some(self.instance_vbo));
            self.gl
                .buffer_data_u8_slice(ARRAY_BUFFER, as_u8_slice(&instance_data), DYNAMIC_DRAW);

            let projection = camera.projection_matrix();
            self.gl.uniform_matrix_4_f32_slice(
                Some(&self.quad_projection_loc),
                false,
                projection.as_ref(),
            );

            self.gl
                .draw_arrays_instanced(TRIANGLES, 0, 6, quads.len() as i32);

            self.gl.bind_vertex_array(None);
        }
    }

    pub fn draw_lines(&self, camera: &Camera, lines: &[(Vec2, Vec2)], color: [f32; 4]) {
        if lines.is_empty() {
            return;
        }

        let mut line_vertices = Vec::with_capacity(lines.len() * 4);
        for (a, b) in lines {
            line_vertices.extend_from_slice(&[a.x, a.y, b.x, b.y]);
        }

        unsafe {
            self.gl.use_program(Some(self.line_program));
            self.gl.bind_vertex_array(Some(self.line_vao));

            let projection = camera.projection_matrix();
            self.gl.uniform_matrix_4_f32_slice(
                Some(&self.line_projection_loc),
                false,
                projection.as_ref(),
            );
            self.gl
                .uniform_4_f32(Some(&self.line_color_loc), color[0], color[1], color[2], color[3]);

            self.gl.bind_buffer(ARRAY_BUFFER, Some(self.line_vbo));
            self.gl
                .buffer_data_u8_slice(ARRAY_BUFFER, as_u8_slice(&line_vertices), DYNAMIC_DRAW);

            self.gl.draw_arrays(LINES, 0, (line_vertices.len() / 2) as i32);

            self.gl.bind_vertex_array(None);
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.quad_program);
            self.gl.delete_vertex_array(self.quad_vao);
            self.gl.delete_buffer(self.quad_vbo);
            self.gl.delete_buffer(self.instance_vbo);
            self.gl.delete_program(self.line_program);
            self.gl.delete_vertex_array(self.line_vao);
            self.gl.delete_buffer(self.line_vbo);
            self.gl.delete_program(self.background_program);
            self.gl.delete_vertex_array(self.background_vao);
            if let Some(texture) = self.background_texture.take() {
                self.gl.delete_texture(texture);
            }
        }
    }
}

fn as_u8_slice<T>(data: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, mem::size_of_val(data)) }
}
